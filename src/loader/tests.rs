use super::*;
use crate::fixtures::{derive_gzip, write_delimited};
use crate::generator::{generate, GeneratorConfig, MarkerTable};
use crate::schema::{categorical_type, columns};
use arrow::array::{Array, StringArray};
use arrow::datatypes::DataType;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

struct Fixture {
    _dir: TempDir,
    table: MarkerTable,
    plain: PathBuf,
    gzip: PathBuf,
}

fn fixture(nrows: usize, ngenotypes: usize) -> Fixture {
    let dir = tempdir().unwrap();
    let table = generate(&GeneratorConfig::new(nrows, ngenotypes, 11)).unwrap();
    let plain = dir.path().join("markers.txt");
    let gzip = dir.path().join("markers.txt.gz");
    write_delimited(&table, &plain).unwrap();
    derive_gzip(&plain, &gzip, 6).unwrap();
    Fixture {
        _dir: dir,
        table,
        plain,
        gzip,
    }
}

fn hints(f: &Fixture) -> LoadHints {
    LoadHints::for_table(f.table.num_genotype_columns(), Some(f.table.num_rows()))
}

#[test]
fn test_every_strategy_reads_plain_input() {
    let f = fixture(120, 6);
    let hints = hints(&f);

    for strategy in default_strategies() {
        let table = strategy
            .load(&f.plain, InputEncoding::Plain, &hints)
            .unwrap_or_else(|e| panic!("{} failed: {}", strategy.name(), e));
        assert_eq!(table.num_rows(), 120, "{}", strategy.name());
        assert_eq!(table.num_columns(), 9, "{}", strategy.name());
    }
}

#[test]
fn test_compressed_input_support() {
    let f = fixture(50, 3);
    let hints = hints(&f);

    for strategy in default_strategies() {
        let result = strategy.load(&f.gzip, InputEncoding::Gzip, &hints);
        if strategy.capabilities().supports_compressed_input {
            let table = result.unwrap();
            assert_eq!(table.num_rows(), 50);
            assert_eq!(table.num_columns(), 6);
        } else {
            assert!(matches!(result, Err(LoadError::UnsupportedInput { .. })));
        }
    }
}

#[test]
fn test_inferred_types() {
    let f = fixture(40, 2);
    let table = ArrowCsvLoader::inferred()
        .load(&f.plain, InputEncoding::Plain, &hints(&f))
        .unwrap();

    let schema = table.schema();
    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(1).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(2).data_type(), &DataType::Int64);
    assert_eq!(schema.field(3).data_type(), &DataType::Utf8);
}

#[test]
fn test_typed_uses_declared_schema() {
    let f = fixture(40, 2);
    let hints = hints(&f);
    let table = ArrowCsvLoader::typed()
        .load(&f.plain, InputEncoding::Plain, &hints)
        .unwrap();

    assert_eq!(table.schema(), &hints.schema);
    assert_eq!(table.schema().field(2).data_type(), &DataType::UInt32);
}

#[test]
fn test_row_count_hint_yields_single_batch() {
    let rows = DEFAULT_BATCH_SIZE + 500;
    let f = fixture(rows, 1);
    let hints = hints(&f);

    let unsized_table = ArrowCsvLoader::typed()
        .load(&f.plain, InputEncoding::Plain, &hints)
        .unwrap();
    assert_eq!(unsized_table.batches().len(), 2);

    let sized_table = ArrowCsvLoader::typed_sized()
        .load(&f.plain, InputEncoding::Plain, &hints)
        .unwrap();
    assert_eq!(sized_table.batches().len(), 1);
    assert_eq!(sized_table.num_rows(), rows);

    // Without a row count the sized strategy falls back to fixed batches
    let no_rows = LoadHints::for_table(1, None);
    let fallback = ArrowCsvLoader::typed_sized()
        .load(&f.plain, InputEncoding::Plain, &no_rows)
        .unwrap();
    assert_eq!(fallback.batches().len(), 2);
}

#[test]
fn test_categorical_columns() {
    let f = fixture(80, 3);
    let table = ArrowCsvLoader::typed_sized_categorical()
        .load(&f.gzip, InputEncoding::Gzip, &hints(&f))
        .unwrap();

    let schema = table.schema();
    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
    assert_eq!(
        schema.field_with_name(columns::CHROMOSOME).unwrap().data_type(),
        &categorical_type()
    );
    assert_eq!(schema.field(3).data_type(), &categorical_type());

    let batch = table.to_single_batch().unwrap();
    assert_eq!(batch.column(3).data_type(), &categorical_type());
    assert_eq!(batch.num_rows(), 80);
}

#[test]
fn test_raw_records_content() {
    let f = fixture(30, 4);
    let table = RawRecordsLoader::new()
        .load(&f.plain, InputEncoding::Plain, &hints(&f))
        .unwrap();

    assert!(table
        .schema()
        .fields()
        .iter()
        .all(|field| field.data_type() == &DataType::Utf8));

    let batch = table.to_single_batch().unwrap();
    let ids = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(ids.value(0), f.table.records()[0].id);

    let calls = batch
        .column(6)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(calls.len(), 30);
    assert!(calls.iter().all(|v| v == Some("N")));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let result =
        ArrowCsvLoader::typed().load(&path, InputEncoding::Plain, &LoadHints::for_table(1, None));
    assert!(matches!(result, Err(LoadError::IoError(_))));
}

#[test]
fn test_select_strategies() {
    let all = select_strategies(&[]).unwrap();
    assert_eq!(all.len(), 5);

    let picked = select_strategies(&["raw_records".to_string(), "typed".to_string()]).unwrap();
    let names: Vec<&str> = picked.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["typed", "raw_records"]);

    let err = select_strategies(&["fread".to_string()]).err().unwrap();
    assert!(matches!(err, LoadError::UnknownStrategy(ref n) if n == "fread"));
}

#[test]
fn test_strategy_names_are_unique() {
    let mut names = strategy_names();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn test_encoding_from_path() {
    assert_eq!(
        InputEncoding::from_path(std::path::Path::new("a/markers.txt.gz")),
        InputEncoding::Gzip
    );
    assert_eq!(
        InputEncoding::from_path(std::path::Path::new("markers.txt")),
        InputEncoding::Plain
    );
}

#[test]
fn test_capabilities() {
    let caps = Capabilities::default();
    assert!(caps.accepts(InputEncoding::Plain));
    assert!(!caps.accepts(InputEncoding::Gzip));
    assert!(caps.compressed().accepts(InputEncoding::Gzip));

    let caps = ArrowCsvLoader::typed_sized_categorical().capabilities();
    assert_eq!(
        caps.to_string(),
        "types=declared rows=hinted categorical=yes gzip=yes"
    );
}
