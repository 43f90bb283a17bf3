//! Benchmarks for terminal rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cheatdeck::config::ThemeMode;
use cheatdeck::document::{displayable_sections, render_section, render_sections};

const SHEET: &str = "# Git\n\n```bash\ngit status\ngit log --oneline\n```\n\n---\n\n\
## Branches\n\n| Command | Effect |\n| :-- | :-- |\n| `git branch` | list |\n| `git switch -c x` | create |\n\n---\n\n\
## Undo\n\n- [x] `git restore file`\n- [ ] `git reset --soft HEAD~1`\n";

fn bench_render_card(c: &mut Criterion) {
    let sections = displayable_sections(SHEET);
    c.bench_function("render_card", |b| {
        b.iter(|| render_section(black_box(sections[0].text()), 78, ThemeMode::Dark))
    });
}

fn bench_render_continuous(c: &mut Criterion) {
    let sections = displayable_sections(SHEET);
    c.bench_function("render_continuous", |b| {
        b.iter(|| render_sections(black_box(&sections), 78, ThemeMode::Dark))
    });
}

criterion_group!(benches, bench_render_card, bench_render_continuous);
criterion_main!(benches);
