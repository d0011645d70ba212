//! Viewport benchmark: Measure navigation, rendering and scroll output.
//!
//! The delta path should stay well under the cost of a full repaint.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flywheel_widgets::{Component, Event, KeyCode, OutputBuffer, TextInput, Viewport};

/// Create a viewport over `lines` lines of numbered text.
fn create_viewport(lines: usize, height: u16, high_performance: bool) -> Viewport {
    let content: Vec<String> = (0..lines)
        .map(|i| format!("{i:>6} the quick brown fox jumps over the lazy dog"))
        .collect();
    let mut viewport = Viewport::new(120, height).with_high_performance(high_performance);
    viewport.set_content(&content.join("\n"));
    viewport
}

fn viewport_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_view");

    for height in [24u16, 50, 100] {
        let viewport = create_viewport(10_000, height, false);
        group.bench_with_input(BenchmarkId::from_parameter(height), &viewport, |b, viewport| {
            b.iter(|| black_box(viewport).view());
        });
    }

    group.finish();
}

fn viewport_page_down(c: &mut Criterion) {
    let standard = create_viewport(10_000, 50, false);
    let high_performance = create_viewport(10_000, 50, true);
    let event = Event::key(KeyCode::PageDown);

    c.bench_function("page_down_standard", |b| {
        b.iter(|| black_box(standard.clone()).update(&event));
    });

    c.bench_function("page_down_high_performance", |b| {
        b.iter(|| black_box(high_performance.clone()).update(&event));
    });
}

fn scroll_output(c: &mut Criterion) {
    let viewport = create_viewport(10_000, 50, true);
    let sync = viewport.sync_command();
    let Some(line_down) = viewport.line_down_command(1) else {
        return;
    };

    let mut output = OutputBuffer::new();

    c.bench_function("output_sync_50_rows", |b| {
        b.iter(|| {
            output.clear();
            output.apply(black_box(&sync));
        });
    });

    c.bench_function("output_scroll_one_line", |b| {
        b.iter(|| {
            output.clear();
            output.apply(black_box(&line_down));
        });
    });
}

fn text_input_typing(c: &mut Criterion) {
    let events: Vec<Event> = "the quick brown fox".chars().map(Event::char).collect();

    c.bench_function("text_input_type_19_chars", |b| {
        b.iter(|| {
            let mut input = TextInput::new();
            for event in &events {
                input = input.update(event).0;
            }
            black_box(input.view())
        });
    });
}

criterion_group!(benches, viewport_view, viewport_page_down, scroll_output, text_input_typing);
criterion_main!(benches);
