use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jksn::prelude::*;

const N_ROWS: usize = 100;
const N_COLS: usize = 10;
const N_BIG_ARR: usize = 2000;

fn big_table() -> Value {
    let rows: Vec<Value> = (0..N_ROWS)
        .map(|row| {
            let record: VecMap<Value, Value> = (0..N_COLS)
                .map(|col| {
                    (
                        Value::from(format!("field{}", col)),
                        Value::from((row * N_COLS + col) as i64),
                    )
                })
                .collect();
            Value::Object(record)
        })
        .collect();
    Value::from(rows)
}

fn big_arr() -> Value {
    let v: Vec<Value> = (0..N_BIG_ARR).map(|i| Value::from(i as i64)).collect();
    Value::from(v)
}

fn bench_enc(c: &mut Criterion) {
    let table = big_table();
    let enc_len = encode_full(&table, false).len();
    c.bench_function(
        &format!("Encoding a record table, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&table), false)),
    );
}

fn bench_dec(c: &mut Criterion) {
    let table = big_table();
    let enc = encode_full(&table, false);
    c.bench_function(
        &format!("Decoding a record table, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full(black_box(enc.as_slice()), false).unwrap()),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let arr = big_arr();
    let enc_len = encode_full(&arr, false).len();
    c.bench_function(
        &format!("Encoding an integer vector, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&arr), false)),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let arr = big_arr();
    let enc = encode_full(&arr, false);
    c.bench_function(
        &format!("Decoding an integer vector of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full(black_box(enc.as_slice()), false).unwrap()),
    );
}

criterion_group!(benches, bench_enc, bench_dec, bench_enc_flat, bench_dec_flat);
criterion_main!(benches);
