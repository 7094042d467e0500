use base64_scan::{AlphabetRegistry, Codec, StreamingDecoder, StreamingEncoder, decode, encode};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::{self, Cursor};

const SIZES: [usize; 5] = [64, 256, 1024, 4096, 16384];

fn get_codec(name: &str) -> Codec {
    let config = AlphabetRegistry::load_default().unwrap();
    config.select(name, None).unwrap()
}

fn sample(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

fn bench_encode_base64(c: &mut Criterion) {
    let codec = get_codec("base64");
    let mut group = c.benchmark_group("encode_base64");

    for size in SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        let data = sample(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| encode(black_box(data), black_box(&codec)));
        });
    }
    group.finish();
}

fn bench_decode_base64(c: &mut Criterion) {
    let codec = get_codec("base64");
    let mut group = c.benchmark_group("decode_base64");

    for size in SIZES.iter() {
        let encoded = encode(&sample(*size), &codec).unwrap();

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| decode(black_box(encoded), black_box(&codec)));
        });
    }
    group.finish();
}

fn bench_decode_noisy(c: &mut Criterion) {
    let codec = get_codec("base64");
    let mut group = c.benchmark_group("decode_noisy");

    for size in SIZES.iter() {
        // 76-column lines with a space between every symbol
        let encoded = encode(&sample(*size), &codec).unwrap();
        let noisy: String = encoded
            .as_bytes()
            .chunks(38)
            .map(|line| {
                let spaced: Vec<String> = line.iter().map(|&b| char::from(b).to_string()).collect();
                format!("{}\n", spaced.join(" "))
            })
            .collect();

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &noisy, |b, noisy| {
            b.iter(|| decode(black_box(noisy), black_box(&codec)));
        });
    }
    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let codec = get_codec("base64url");
    let mut group = c.benchmark_group("streaming");
    let data = sample(1 << 20);
    let encoded = encode(&data, &codec).unwrap();
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| {
            StreamingEncoder::new(&codec, io::sink())
                .encode(&mut Cursor::new(black_box(&data)))
                .unwrap()
        });
    });
    group.bench_function("decode", |b| {
        b.iter(|| {
            StreamingDecoder::new(&codec, io::sink())
                .decode(&mut Cursor::new(black_box(&encoded)))
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_encode_base64,
    bench_decode_base64,
    bench_decode_noisy,
    bench_streaming
);
criterion_main!(benches);
