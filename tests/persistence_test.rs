use farmtech::core::{Geometry, Input, Shape};
use farmtech::{CsvPersistence, Farm, FarmError, LocalStorage};
use std::fs;
use tempfile::TempDir;

fn persistence(dir: &std::path::Path) -> CsvPersistence<LocalStorage> {
    CsvPersistence::new(LocalStorage::new(dir), "culturas.csv", "insumos.csv")
}

#[test]
fn test_fresh_directory_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("dados");

    let farm = Farm::open(persistence(&data_dir)).unwrap();
    assert!(farm.cultures().is_empty());
    assert!(farm.inputs().is_empty());
    // Opening never writes.
    assert!(!data_dir.exists());
}

#[test]
fn test_round_trip_through_disk() {
    let temp_dir = TempDir::new().unwrap();

    let mut farm = Farm::open(persistence(temp_dir.path())).unwrap();
    farm.create_culture(
        "Milho",
        Geometry::Rectangle {
            width: 10.0,
            length: 20.0,
        },
        4,
    )
    .unwrap();
    farm.create_culture("Café", Geometry::Circle { radius: 7.5 }, 3)
        .unwrap();
    farm.create_culture("Milho", Geometry::Circle { radius: 1.0 }, 1)
        .unwrap();
    farm.create_input("Ureia", 0.5).unwrap();
    farm.create_input("Fosfato \"MAP\"", 0.125).unwrap();

    let reopened = Farm::open(persistence(temp_dir.path())).unwrap();
    assert_eq!(reopened.cultures().list(), farm.cultures().list());
    assert_eq!(reopened.inputs().list(), farm.inputs().list());
    assert_eq!(reopened.cultures().get(2).unwrap().shape(), Shape::Circle);
}

#[test]
fn test_legacy_portuguese_headers() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("culturas.csv"),
        "nome,formato,area,ruas\nMilho,retangular,200.0,4\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("insumos.csv"),
        "nome,dose_m2\nUreia,0.5\n",
    )
    .unwrap();

    let mut farm = Farm::open(persistence(temp_dir.path())).unwrap();
    let culture = farm.cultures().get(1).unwrap();
    assert_eq!(culture.shape(), Shape::Rectangle);
    assert_eq!(culture.area_per_subdivision(), 50.0);
    assert_eq!(farm.inputs().list(), &[Input::new("Ureia", 0.5)]);

    // The next save rewrites both files in the current layout.
    let application = farm.apply(1, 1).unwrap();
    assert_eq!(application.total, 100.0);
    farm.create_input("Calcário", 2.0).unwrap();
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("culturas.csv")).unwrap(),
        "name,shape,total_area,subdivision_count,area_per_subdivision\n\
         Milho,rectangle,200.0,4,50.0\n"
    );
}

#[test]
fn test_malformed_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("insumos.csv"),
        "name,dose_per_area\nUreia,meio litro\n",
    )
    .unwrap();

    let result = Farm::open(persistence(temp_dir.path()));
    assert!(matches!(result, Err(FarmError::CsvError(_))));
}

#[test]
fn test_truncated_row_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("culturas.csv"),
        "name,shape,total_area,subdivision_count,area_per_subdivision\nMilho,rectangle\n",
    )
    .unwrap();

    assert!(Farm::open(persistence(temp_dir.path())).is_err());
}
