//! Parsing benchmarks
//!
//! Run with: cargo bench --bench parse

use byteorder::{LittleEndian, WriteBytesExt};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ktx::*;

/// Build a little-endian RGBA8 KTX 1 file with a full mip chain and
/// `records` key/value pairs
fn create_test_file(size: u32, records: usize) -> Vec<u8> {
    let levels = 32 - size.leading_zeros();

    let mut key_values = Vec::new();
    for i in 0..records {
        let payload = format!("key{}\0value{}\0", i, i);
        key_values.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        key_values.extend_from_slice(payload.as_bytes());
    }
    while key_values.len() % 4 != 0 {
        key_values.push(0);
    }

    let mut data = KTX1_IDENTIFIER.to_vec();
    data.extend_from_slice(&Endianness::Little.marker());
    for value in [
        0x1401,
        1,
        0x1908,
        0x8c43,
        0x1908,
        size,
        size,
        0,
        0,
        1,
        levels,
        key_values.len() as u32,
    ] {
        data.write_u32::<LittleEndian>(value).unwrap();
    }
    data.extend_from_slice(&key_values);

    for level in 0..levels {
        let dim = (size >> level).max(1);
        let image_size = dim * dim * 4;
        data.write_u32::<LittleEndian>(image_size).unwrap();
        data.resize(data.len() + image_size as usize, 0x80);
    }

    data
}

fn parse_bytes(data: &[u8]) -> Ktx1File<MemoryChannel> {
    let request = ParseRequest::new(MemoryChannel::new(data.to_vec()), "bench");
    parse(request).unwrap()
}

fn bench_parse_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parse by Texture Size");

    for &size in &[64u32, 256, 1024] {
        let data = create_test_file(size, 1);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &data,
            |b, data| {
                b.iter(|| parse_bytes(black_box(data)));
            },
        );
    }

    group.finish();
}

fn bench_parse_key_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parse Key/Value Region");

    for &records in &[1usize, 64, 1024] {
        let data = create_test_file(16, records);

        group.throughput(Throughput::Elements(records as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records), &data, |b, data| {
            b.iter(|| parse_bytes(black_box(data)).key_value_data().len());
        });
    }

    group.finish();
}

fn bench_read_sub_images(c: &mut Criterion) {
    let data = create_test_file(512, 0);

    c.bench_function("read all sub-images 512x512", |b| {
        b.iter(|| {
            let mut file = parse_bytes(&data);
            let subs = file.sub_images().to_vec();
            subs.iter()
                .map(|sub| file.read_sub_image(sub).unwrap().len())
                .sum::<usize>()
        });
    });
}

criterion_group!(
    benches,
    bench_parse_by_size,
    bench_parse_key_values,
    bench_read_sub_images
);
criterion_main!(benches);
