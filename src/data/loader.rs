use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::derive::{LoadOptions, RawRecord};
use super::error::{LoadError, MalformedInput, Result};
use super::model::{Pokedex, Pokemon};

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "stats", "types"];

/// Optional column; synthesised from the id when missing.
pub const IMAGE_URL_COLUMN: &str = "image_url";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and enrich every record of a pokédex file with default options.
pub fn load(path: &Path) -> Result<Vec<Pokemon>> {
    load_with(path, &LoadOptions::default()).map(|dex| dex.records)
}

/// Load a pokédex file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-delimited, header row
/// * `.tsv`     – tab-delimited, header row
/// * `.json`    – `[{ "id": 1, "name": "...", "stats": "...", "types": "..." }, ...]`
/// * `.parquet` – any column types that cast to UTF-8
///
/// Any malformed row aborts the whole load; no partial table is returned.
pub fn load_with(path: &Path, options: &LoadOptions) -> Result<Pokedex> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    log::debug!("loading {} as .{ext}", path.display());

    let raw = match ext.as_str() {
        "csv" => read_delimited(path, b',')?,
        "tsv" => read_delimited(path, b'\t')?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(row, rec)| rec.normalize(row, options))
        .collect::<Result<Vec<_>>>()?;

    log::info!("loaded {} pokémon from {}", records.len(), path.display());
    Ok(Pokedex::from_records(records))
}

fn normalize_header(h: &str) -> String {
    h.trim().to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names; `stats` holds `key=value` pairs and `types`
/// a comma-separated list, both quoted when they contain the delimiter.
fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Short rows leave their trailing cells empty.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MalformedInput::MissingColumn(name).into())
    };
    let id_idx = column("id")?;
    let name_idx = column("name")?;
    let stats_idx = column("stats")?;
    let types_idx = column("types")?;
    let image_idx = headers.iter().position(|h| h == IMAGE_URL_COLUMN);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(RawRecord {
            id: cell(id_idx),
            name: cell(name_idx),
            stats: Some(cell(stats_idx)),
            types: Some(cell(types_idx)),
            image_url: image_idx.map(cell),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "id": 1, "name": "Bulbasaur", "stats": "hp=45,attack=49", "types": "Grass,Poison" },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or_else(|| {
        MalformedInput::InvalidLayout("expected a top-level JSON array".to_string())
    })?;

    records
        .iter()
        .enumerate()
        .map(|(row, rec)| -> Result<RawRecord> {
            let obj = rec.as_object().ok_or_else(|| MalformedInput::InvalidRow {
                row,
                reason: "not a JSON object".to_string(),
            })?;
            json_row(obj)
        })
        .collect()
}

fn json_row(obj: &Map<String, JsonValue>) -> Result<RawRecord> {
    Ok(RawRecord {
        id: json_text(json_required(obj, "id")?).unwrap_or_default(),
        name: json_text(json_required(obj, "name")?).unwrap_or_default(),
        stats: json_text(json_required(obj, "stats")?),
        types: json_text(json_required(obj, "types")?),
        image_url: json_field(obj, IMAGE_URL_COLUMN).and_then(json_text),
    })
}

/// Keys are matched the same way as CSV headers.
fn json_field<'a>(obj: &'a Map<String, JsonValue>, name: &str) -> Option<&'a JsonValue> {
    obj.iter()
        .find(|(k, _)| normalize_header(k) == name)
        .map(|(_, v)| v)
}

fn json_required<'a>(obj: &'a Map<String, JsonValue>, name: &'static str) -> Result<&'a JsonValue> {
    json_field(obj, name).ok_or_else(|| MalformedInput::MissingColumn(name).into())
}

fn json_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Every used column is cast to UTF-8 first, so `id`
/// may be stored as integer or string. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    check_parquet_schema(builder.schema())?;
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let id = utf8_column(&batch, "id")?;
        let name = utf8_column(&batch, "name")?;
        let stats = utf8_column(&batch, "stats")?;
        let types = utf8_column(&batch, "types")?;
        let image_url = optional_utf8_column(&batch, IMAGE_URL_COLUMN)?;

        for row in 0..batch.num_rows() {
            rows.push(RawRecord {
                id: utf8_value(&id, row).unwrap_or_default(),
                name: utf8_value(&name, row).unwrap_or_default(),
                stats: utf8_value(&stats, row),
                types: utf8_value(&types, row),
                image_url: image_url.as_ref().and_then(|col| utf8_value(col, row)),
            });
        }
    }
    Ok(rows)
}

fn check_parquet_schema(schema: &Schema) -> Result<()> {
    for name in REQUIRED_COLUMNS {
        if parquet_field_index(schema, name).is_none() {
            return Err(MalformedInput::MissingColumn(name).into());
        }
    }
    Ok(())
}

fn parquet_field_index(schema: &Schema, name: &str) -> Option<usize> {
    schema
        .fields()
        .iter()
        .position(|f| normalize_header(f.name()) == name)
}

// -- Parquet / Arrow helpers --

fn optional_utf8_column(batch: &RecordBatch, name: &str) -> Result<Option<ArrayRef>> {
    parquet_field_index(&batch.schema(), name)
        .map(|idx| cast(batch.column(idx), &DataType::Utf8).map_err(LoadError::from))
        .transpose()
}

fn utf8_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef> {
    optional_utf8_column(batch, name)?
        .ok_or_else(|| MalformedInput::MissingColumn(name).into())
}

/// Read one cell of a column already cast to `Utf8`.
fn utf8_value(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    Some(col.as_string::<i32>().value(row).to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::Generation;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file.flush().expect("flush temp file");
        file
    }

    #[test]
    fn csv_rows_are_enriched_in_order() {
        let file = write_temp(
            ".csv",
            "id,name,stats,types\n\
             1,Bulbasaur,\"hp=45,attack=49,defense=49,special_attack=65,special_defense=65,speed=45\",\"Grass,Poison\"\n\
             4,Charmander,\"hp=39,attack=52,defense=43,speed=65\",Fire\n\
             1026,Newmon,,\n",
        );
        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 3);

        let bulba = &records[0];
        assert_eq!(bulba.name, "Bulbasaur");
        assert_eq!(bulba.special_defense, Some(65));
        assert_eq!(bulba.primary_type.as_deref(), Some("Grass"));
        assert_eq!(bulba.secondary_type.as_deref(), Some("Poison"));
        assert!(bulba.image_url.ends_with("/1.png"));

        let charm = &records[1];
        assert_eq!(charm.special_attack, None);
        assert_eq!(charm.secondary_type, None);

        let newmon = &records[2];
        assert_eq!(newmon.generation, Generation::UNKNOWN);
        assert_eq!(newmon.primary_type, None);
        assert_eq!(newmon.hp, None);
    }

    #[test]
    fn headers_are_trimmed_and_case_insensitive() {
        let file = write_temp(
            ".csv",
            " ID ,Name,Stats,Types,Image_URL\n25,Pikachu,hp=35,Electric,pika.png\n",
        );
        let records = load(file.path()).unwrap();
        assert_eq!(records[0].id, 25);
        assert_eq!(records[0].image_url, "pika.png");
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let file = write_temp(".csv", "id,name,types\n1,Bulbasaur,Grass\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MalformedInput(MalformedInput::MissingColumn("stats"))
        ));
    }

    #[test]
    fn non_numeric_id_aborts_the_load() {
        let file = write_temp(
            ".csv",
            "id,name,stats,types\n1,Bulbasaur,hp=45,Grass\nx2,Ivysaur,hp=60,Grass\n",
        );
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MalformedInput(MalformedInput::InvalidId { row: 1, .. })
        ));
    }

    #[test]
    fn short_row_leaves_trailing_cells_absent() {
        let file = write_temp(
            ".csv",
            "id,name,stats,types\n1,Bulbasaur,hp=45,Grass\n1026,Fakemon,hp=1\n",
        );
        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].hp, Some(1));
        assert_eq!(records[1].primary_type, None);
        assert_eq!(records[1].secondary_type, None);
        assert_eq!(records[1].generation, Generation::UNKNOWN);
    }

    #[test]
    fn missing_csv_file_reports_path() {
        let path = Path::new("/nonexistent/pokedex.csv");
        match load(path).unwrap_err() {
            LoadError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn csv_errors_are_not_double_prefixed() {
        let inner = csv::Error::from(std::io::Error::other("disk went away"));
        let expected = inner.to_string();
        let msg = LoadError::from(inner).to_string();
        assert_eq!(msg, expected);
        assert!(!msg.contains("CSV error: CSV error"), "{msg}");
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let file = write_temp(
            ".tsv",
            "id\tname\tstats\ttypes\n7\tSquirtle\thp=44,attack=48\tWater\n",
        );
        let records = load(file.path()).unwrap();
        assert_eq!(records[0].attack, Some(48));
        assert_eq!(records[0].primary_type.as_deref(), Some("Water"));
    }

    #[test]
    fn json_records_accept_numeric_and_null_cells() {
        let file = write_temp(
            ".json",
            r#"[
                {"id": 133, "name": "Eevee", "stats": "hp=55,speed=55", "types": "Normal"},
                {"id": "906", "name": "Sprigatito", "stats": null, "types": null,
                 "image_url": "sprig.png"}
            ]"#,
        );
        let records = load(file.path()).unwrap();
        assert_eq!(records[0].generation.number(), 1);
        assert_eq!(records[0].speed, Some(55));
        assert_eq!(records[1].generation.number(), 9);
        assert_eq!(records[1].primary_type, None);
        assert_eq!(records[1].image_url, "sprig.png");
    }

    #[test]
    fn json_requires_array_of_objects() {
        let file = write_temp(".json", r#"{"id": 1}"#);
        assert!(load(file.path()).unwrap_err().is_malformed_input());

        let file = write_temp(".json", r#"[{"id": 1, "name": "a", "stats": ""}]"#);
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MalformedInput(MalformedInput::MissingColumn("types"))
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        assert!(matches!(
            load(file.path()).unwrap_err(),
            LoadError::UnsupportedExtension(ext) if ext == "xlsx"
        ));
    }

    #[test]
    fn custom_image_template_is_applied() {
        let file = write_temp(".csv", "id,name,stats,types\n150,Mewtwo,hp=106,Psychic\n");
        let options = LoadOptions {
            image_url_template: "file:///sprites/{id}.png".to_string(),
        };
        let dex = load_with(file.path(), &options).unwrap();
        assert_eq!(dex.records[0].image_url, "file:///sprites/150.png");
        assert!(dex.types.contains("Psychic"));
    }
}
