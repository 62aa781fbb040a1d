//! O(n) performance verification tests for TokenStream

use super::tokenize::TokenStream;

fn with_step_counter<F: FnOnce()>(f: F) -> usize {
    use crate::preview::engine::tokenize::test_counter;
    test_counter::reset();
    f();
    test_counter::get()
}

fn count_steps(text: &str) -> usize {
    with_step_counter(|| {
        let mut stream = TokenStream::new(text);
        while stream.next().is_some() {}
    })
}

fn steps_per_byte(steps: usize, input_len: usize) -> f64 {
    steps as f64 / input_len as f64
}

#[test]
fn test_tokenstream_o_n_performance() {
    let sizes = [100, 1000, 10000];
    let ratios: Vec<f64> = sizes
        .iter()
        .map(|&n| {
            let text = (0..n)
                .map(|i| format!("{{{{token{}}}}} {{% tag{} %}} ", i, i))
                .collect::<String>();
            steps_per_byte(count_steps(&text), text.len())
        })
        .collect();

    // Steps-per-byte stays constant for a linear scan
    let avg = ratios.iter().sum::<f64>() / ratios.len() as f64;
    for ratio in &ratios {
        assert!(
            (ratio - avg).abs() <= avg * 0.2,
            "steps per byte not constant: {:?}",
            ratios
        );
    }
}

#[test]
fn test_each_byte_processed_at_most_twice() {
    let inputs = [
        "{a{b{c{d{e{f{g".repeat(500),
        "{{ a } b } c } d }}".repeat(500),
        "{% a % b % c %}".repeat(500),
        "{".repeat(5000),
        "}}%}".repeat(1000),
    ];

    for input in &inputs {
        let steps = count_steps(input);
        assert!(
            steps <= input.len() * 2,
            "{} steps for {} bytes",
            steps,
            input.len()
        );
    }
}

#[test]
fn test_unterminated_token_consumes_input_once() {
    let input = format!("{{{{ {}", "x".repeat(10000));
    let steps = count_steps(&input);
    assert!(steps <= input.len());
}
