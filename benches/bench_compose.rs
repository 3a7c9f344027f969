use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sora_emit::{GrowableBuffer, Origin, OutputFile, SourceMapWriter, Writer};

const LINE: &str = "const value = compute(input, options);";

// a generated file with `lines` lines, one entry per token
fn first_stage(lines: u32) -> OutputFile {
    let mut file = OutputFile::new("stage1.js");
    let mut writer = SourceMapWriter::new(file.path());
    for line in 0..lines {
        for (idx, token) in LINE.split_inclusive(' ').enumerate() {
            writer.write(token, Some(Origin::new("input.ts", line, idx as u32 * 8)));
        }
        writer.write("\n", None);
    }
    writer.finish(&mut file);
    file
}

fn compose(stage: &OutputFile) {
    let mut writer = SourceMapWriter::with_indent(Some("stage2.js"), "  ");
    writer.write("(function () {", None);
    writer.indent();
    writer.write("\n", None);
    writer.write(stage.text().unwrap_or_default(), Some(stage.origin(0, 0)));
    writer.unindent();
    writer.write("\n})();", None);
    black_box(writer.finalize());
}

fn benchmark_compose(c: &mut Criterion) {
    for lines in [100, 10_000] {
        let stage = first_stage(lines);
        let mut bg = c.benchmark_group(format!("compose({lines})"));
        bg.bench_with_input("single", &stage, |b, input| b.iter(|| compose(input)));
        bg.bench_with_input("serialize", &stage, |b, input| {
            let sm = input.source_map().unwrap();
            b.iter(|| {
                let mut buffer = GrowableBuffer::new();
                sm.write(&mut buffer).unwrap();
                black_box(buffer)
            })
        });
    }
}

criterion_group!(compose_group, benchmark_compose);
criterion_main!(compose_group);
