use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use csvmerge::{
  CsvOptions, CsvParser, CsvSerializer, InputFile, MemorySink, MergeConfig, MergePipeline, StatusBoard,
};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

// Builds `num_files` in-memory CSV inputs of `rows_per_file` data rows each.
fn make_inputs(num_files: usize, rows_per_file: usize) -> Vec<InputFile> {
  (0..num_files)
    .map(|f| {
      let mut text = String::from("id,name,amount,note\n");
      for r in 0..rows_per_file {
        text.push_str(&format!("{f}-{r},name {r},{}.{:02},\"note, with comma\"\n", r * 3, r % 100));
      }
      InputFile::from_bytes(format!("file_{f}.csv"), text)
    })
    .collect()
}

fn build_pipeline() -> MergePipeline {
  MergePipeline::new(
    Arc::new(CsvParser::new(CsvOptions::default())),
    Arc::new(CsvSerializer::new(CsvOptions::default())),
    Arc::new(MemorySink::new()),
    MergeConfig::default(),
    StatusBoard::new(),
  )
}

fn bench_merge_in_memory(c: &mut Criterion) {
  let mut group = c.benchmark_group("MergeInMemory");
  let rt = Runtime::new().unwrap();

  for num_files in [2usize, 10, 50].iter() {
    for rows_per_file in [10usize, 1_000].iter() {
      let inputs = make_inputs(*num_files, *rows_per_file);
      // A MemorySink keeps every artifact, so each measurement gets a fresh pipeline.
      group.throughput(Throughput::Elements((*num_files * *rows_per_file) as u64));
      group.bench_with_input(
        BenchmarkId::new(format!("files_{}", num_files), rows_per_file),
        &inputs,
        |b, inputs| {
          b.to_async(&rt).iter_batched(
            || (build_pipeline(), inputs.clone()),
            |(pipeline, files)| async move { pipeline.merge(files).await },
            criterion::BatchSize::SmallInput,
          );
        },
      );
    }
  }
  group.finish();
}

fn bench_serialize_only(c: &mut Criterion) {
  use csvmerge::TabularSerializer;

  let mut group = c.benchmark_group("SerializeMergedRows");
  for rows in [100usize, 10_000].iter() {
    let table: Vec<Vec<String>> = (0..*rows)
      .map(|r| vec![r.to_string(), format!("name {}", r), "a,b".to_string()])
      .collect();
    let serializer = CsvSerializer::default();
    group.throughput(Throughput::Elements(*rows as u64));
    group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
      b.iter(|| serializer.serialize(table).unwrap());
    });
  }
  group.finish();
}

criterion_group!(benches, bench_merge_in_memory, bench_serialize_only);
criterion_main!(benches);
