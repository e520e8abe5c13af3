use core_render::{RenderOptions, TerminalRenderer};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn session_transcript(lines: usize) -> String {
    let mut s = String::new();
    for i in 0..lines {
        s.push_str(&format!("drwxr-xr-x  2 user user 4096 Oct 19 12:{:02} dir{i}\n", i % 60));
    }
    s
}

fn bench_render_prompt_column(c: &mut Criterion) {
    let content = session_transcript(2_000);
    let renderer = TerminalRenderer::new();
    c.bench_function("terminal_render_prompt_2000_lines", |b| {
        b.iter(|| renderer.render(black_box(&content), black_box("user@host:~$")))
    });
}

fn bench_render_escaped(c: &mut Criterion) {
    let content = session_transcript(2_000).replace("dir", "<dir>");
    let renderer = TerminalRenderer::with_options(RenderOptions {
        header: Some("Terminal".into()),
        escape: true,
    });
    c.bench_function("terminal_render_escaped_2000_lines", |b| {
        b.iter(|| renderer.render(black_box(&content), black_box("$")))
    });
}

criterion_group!(benches, bench_render_prompt_column, bench_render_escaped);
criterion_main!(benches);
