use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use intelhex_core::{
    decoder::{decode_line, decode_record},
    encoder::{encode_line, encode_record},
    Record,
};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [16usize, 32, 255] {
        let record = Record::data(0x1000, vec![0x42u8; size]).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("record", size), &record, |b, r| {
            b.iter(|| encode_record(black_box(r)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("line", size), &record, |b, r| {
            b.iter(|| encode_line(black_box(r)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [16usize, 32, 255] {
        let record = Record::data(0x1000, vec![0x42u8; size]).unwrap();
        let raw = encode_record(&record).unwrap();
        let line = encode_line(&record).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("record", size), &raw, |b, data| {
            b.iter(|| decode_record(black_box(data)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("line", size), &line, |b, text| {
            b.iter(|| decode_line(black_box(text.as_bytes())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
