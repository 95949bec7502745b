//! Benchmarks for unhwp parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic record streams and UTF-16 buffers, so they
//! measure the decoders without needing sample documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const PARA_TEXT: u32 = 67;
const PARA_HEADER: u32 = 66;

fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn record(tag: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 8);
    if payload.len() >= 0xFFF {
        out.extend_from_slice(&(tag | (0xFFF << 20)).to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    } else {
        out.extend_from_slice(&(tag | ((payload.len() as u32) << 20)).to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

/// Creates a section stream with the given number of paragraphs.
fn create_section(paragraphs: usize) -> Vec<u8> {
    let mut tab = utf16("\t");
    tab.extend_from_slice(&[0u8; 12]);

    let mut data = Vec::new();
    for i in 0..paragraphs {
        data.extend(record(PARA_HEADER, &[0u8; 22]));
        let mut text = utf16(&format!(
            "{}. 자유수영 일일발권 평일 06:00~07:00 / 토요일 09:00~12:00",
            i + 1
        ));
        text.extend_from_slice(&tab);
        text.extend(utf16("성인 3,000원\r"));
        data.extend(record(PARA_TEXT, &text));
    }
    data
}

/// Benchmark container detection.
fn bench_format_detection(c: &mut Criterion) {
    let mut cfb_header = vec![0u8; 512];
    cfb_header[..8].copy_from_slice(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]);
    cfb_header[26] = 3;
    cfb_header[30] = 9;
    let non_hwp_data = b"Not an HWP file at all, just random text content";

    c.bench_function("detect_valid_container", |b| {
        b.iter(|| unhwp::detect_format_from_bytes(black_box(&cfb_header)).unwrap());
    });

    c.bench_function("detect_non_container", |b| {
        b.iter(|| unhwp::detect_format_from_bytes(black_box(non_hwp_data)).is_err());
    });
}

/// Benchmark record parsing and paragraph decoding at various sizes.
fn bench_section_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_parsing");

    for paragraphs in [10, 100, 1000].iter() {
        let data = create_section(*paragraphs);

        group.bench_function(format!("{}_records", paragraphs * 2), |b| {
            b.iter(|| unhwp::parser::parse_records(black_box(&data)).len());
        });

        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| unhwp::parser::parse_section(0, black_box(&data)));
        });
    }

    group.finish();
}

/// Benchmark the fallback scanner over a buffer that mixes text and noise.
fn bench_fallback(c: &mut Criterion) {
    let mut data = Vec::new();
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    for _ in 0..64 {
        for _ in 0..128 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            data.extend_from_slice(&state.to_le_bytes());
        }
        data.extend(utf16("\n수영장 정기휴관 및 임시휴관 안내\n"));
    }

    c.bench_function("fallback_scan_64k", |b| {
        b.iter(|| unhwp::extract_fallback(black_box(&data)));
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_section_parsing,
    bench_fallback,
);
criterion_main!(benches);
