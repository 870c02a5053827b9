//! End-to-end tests: write a pokédex file in each supported format, load it
//! through the public API, then filter and average.

use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::NamedTempFile;

use pokedash::data::filter::{filter, PokemonFilter};
use pokedash::data::loader::{load, load_with};
use pokedash::data::derive::LoadOptions;
use pokedash::data::model::{Generation, Stat};
use pokedash::data::stats::average_stats;

// =============================================================================
// Fixtures
// =============================================================================

const CSV: &str = "\
id,name,stats,types
1,Bulbasaur,\"hp=45,attack=49,defense=49,special_attack=65,special_defense=65,speed=45\",\"Grass, Poison\"
151,Mew,\"hp=100,attack=100,defense=100,special_attack=100,special_defense=100,speed=100\",Psychic
152,Chikorita,\"hp=45,attack=49,defense=65,speed=45\",Grass
1025,Pecharunt,\"hp=88,attack=88,defense=160,special_attack=88,special_defense=88,speed=88\",\"Poison,Ghost\"
1026,Fakemon,hp=1,
";

fn temp_file(suffix: &str, contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents).expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn parquet_fixture() -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".parquet")
        .tempfile()
        .expect("Failed to create temp file");

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("stats", DataType::Utf8, true),
        Field::new("types", DataType::Utf8, true),
        Field::new("image_url", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![25, 494])),
        Arc::new(StringArray::from(vec!["Pikachu", "Victini"])),
        Arc::new(StringArray::from(vec![Some("hp=35,attack=55,speed=90"), None])),
        Arc::new(StringArray::from(vec![Some("Electric"), Some("Psychic,Fire")])),
        Arc::new(StringArray::from(vec![Some("pika.png"), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    let handle = std::fs::File::create(file.path()).expect("Failed to open temp file");
    let mut writer = ArrowWriter::try_new(handle, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
    file
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn csv_load_derives_every_column() {
    let file = temp_file(".csv", CSV.as_bytes());
    let records = load(file.path()).expect("load csv");

    let ids: Vec<i64> = records.iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 151, 152, 1025, 1026]);

    let gens: Vec<u8> = records.iter().map(|p| p.generation.number()).collect();
    assert_eq!(gens, [1, 1, 2, 9, 99]);

    assert_eq!(records[0].secondary_type.as_deref(), Some("Poison"));
    assert_eq!(records[2].special_attack, None);
    assert_eq!(records[4].primary_type, None);
    assert_eq!(records[4].hp, Some(1));
    assert!(records
        .iter()
        .all(|p| p.image_url.ends_with(&format!("/{}.png", p.id))));
}

#[test]
fn filter_then_average() {
    let file = temp_file(".csv", CSV.as_bytes());
    let records = load(file.path()).expect("load csv");

    let everything = filter(&records, &PokemonFilter::default());
    assert_eq!(everything.len(), records.len());

    let poison = filter(&records, &PokemonFilter::from_labels("All", "Poison").unwrap());
    let names: Vec<&str> = poison.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Bulbasaur", "Pecharunt"]);

    let avg = average_stats(poison);
    assert_eq!(avg[&Stat::Defense], 104.5);

    let gen1 = filter(&records, &PokemonFilter::from_labels("1", "All").unwrap());
    let avg = average_stats(gen1);
    assert_eq!(avg[&Stat::Hp], 72.5);
    assert_eq!(avg[&Stat::SpecialAttack], 82.5);
}

#[test]
fn missing_stats_leave_the_mean() {
    let file = temp_file(".csv", CSV.as_bytes());
    let records = load(file.path()).expect("load csv");

    let gen2 = filter(&records, &PokemonFilter::from_labels("2", "All").unwrap());
    assert_eq!(gen2.len(), 1);
    let avg = average_stats(gen2);
    assert_eq!(avg[&Stat::Defense], 65.0);
    assert_eq!(avg[&Stat::SpecialAttack], 0.0);
    assert_eq!(avg[&Stat::SpecialDefense], 0.0);
}

#[test]
fn absent_generation_filters_to_empty() {
    let file = temp_file(".csv", CSV.as_bytes());
    let records = load(file.path()).expect("load csv");
    let f = PokemonFilter {
        generation: Generation::new(5),
        pokemon_type: None,
    };
    assert!(filter(&records, &f).is_empty());
}

#[test]
fn parquet_load_casts_integer_ids() {
    let file = parquet_fixture();
    let dex = load_with(file.path(), &LoadOptions::default()).expect("load parquet");
    assert_eq!(dex.len(), 2);

    let pika = &dex.records[0];
    assert_eq!(pika.id, 25);
    assert_eq!(pika.image_url, "pika.png");
    assert_eq!(pika.speed, Some(90));

    let victini = &dex.records[1];
    assert_eq!(victini.generation.number(), 5);
    assert_eq!(victini.hp, None);
    assert_eq!(victini.secondary_type.as_deref(), Some("Fire"));
    assert!(victini.image_url.ends_with("/494.png"));

    assert_eq!(
        dex.types.iter().map(String::as_str).collect::<Vec<_>>(),
        ["Electric", "Fire", "Psychic"]
    );
}

#[test]
fn pq_extension_loads_as_parquet() {
    let parquet = parquet_fixture();
    let pq = tempfile::Builder::new()
        .suffix(".pq")
        .tempfile()
        .expect("Failed to create temp file");
    std::fs::copy(parquet.path(), pq.path()).expect("Failed to copy fixture");

    let from_pq = load(pq.path()).expect("load .pq");
    let from_parquet = load(parquet.path()).expect("load .parquet");
    assert_eq!(from_pq.len(), 2);
    assert_eq!(from_pq, from_parquet);
}

#[test]
fn json_and_tsv_agree_with_csv() {
    let json = temp_file(
        ".json",
        br#"[{"id": 152, "name": "Chikorita", "stats": "hp=45,attack=49,defense=65,speed=45", "types": "Grass"}]"#,
    );
    let tsv = temp_file(
        ".tsv",
        b"id\tname\tstats\ttypes\n152\tChikorita\thp=45,attack=49,defense=65,speed=45\tGrass\n",
    );
    let csv = temp_file(".csv", CSV.as_bytes());

    let from_json = load(json.path()).expect("load json");
    let from_tsv = load(tsv.path()).expect("load tsv");
    let from_csv = load(csv.path()).expect("load csv");

    assert_eq!(from_json[0], from_csv[2]);
    assert_eq!(from_tsv[0], from_csv[2]);
}

#[test]
fn bad_id_fails_without_partial_table() {
    let file = temp_file(".csv", b"id,name,stats,types\n1,A,hp=1,Grass\none,B,hp=2,Fire\n");
    let err = load(file.path()).expect_err("non-numeric id must fail");
    assert!(err.is_malformed_input());
    assert!(err.to_string().contains("'one'"));
}
