use farmtech::{CsvPersistence, Farm, FarmConfig, LocalStorage, ScriptedConsole, Session};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn open_farm(dir: &Path) -> Farm<LocalStorage> {
    let storage = LocalStorage::new(dir);
    Farm::open(CsvPersistence::new(storage, "culturas.csv", "insumos.csv")).unwrap()
}

fn run_session(dir: &Path, answers: &[&str]) -> (ScriptedConsole, Farm<LocalStorage>) {
    let mut session = Session::new(ScriptedConsole::new(answers.iter().copied()), open_farm(dir));
    session.run().unwrap();
    session.into_parts()
}

fn read(dir: &Path, file: &str) -> Option<String> {
    fs::read_to_string(dir.join(file)).ok()
}

const CREATE_MILHO: [&str; 11] = ["1", "1", "", "Milho", "1", "10", "20", "4", "", "5", "4"];

#[test]
fn test_create_culture_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let (console, farm) = run_session(temp_dir.path(), &CREATE_MILHO);

    let culture = farm.cultures().get(1).unwrap();
    assert_eq!(culture.name(), "Milho");
    assert_eq!(culture.total_area(), 200.0);
    assert_eq!(culture.area_per_subdivision(), 50.0);

    let transcript = console.transcript();
    assert!(transcript.contains("esse terreno retangular possui uma área de 200.00 m²!"));
    assert!(transcript.contains("✅ Cultura cadastrada com sucesso!"));
    assert!(transcript.contains("🧩 Área por rua: 50.00 m²"));

    assert_eq!(
        read(temp_dir.path(), "culturas.csv").unwrap(),
        "name,shape,total_area,subdivision_count,area_per_subdivision\n\
         Milho,rectangle,200.0,4,50.0\n"
    );
    assert_eq!(
        read(temp_dir.path(), "insumos.csv").unwrap(),
        "name,dose_per_area\n"
    );
}

#[test]
fn test_apply_input_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let (console, _) = run_session(
        temp_dir.path(),
        &[
            "1", "1", "", "Milho", "1", "10", "20", "4", "", "5", // culture
            "2", "1", "", "Ureia", "0.5", "", "5", // input
            "3", "", "1", "1", "", // apply
            "4",
        ],
    );

    let transcript = console.transcript();
    assert!(transcript.contains("1. Milho (Área: 200.00 m², Ruas: 4)"));
    assert!(transcript.contains("1. Ureia (Dose: 0.5 L/m²)"));
    assert!(transcript.contains("📊 Total necessário: 100.00 litros"));
    assert!(transcript.contains("🛤️ Insumo por rua: 25.00 litros"));
}

#[test]
fn test_apply_with_invalid_culture_number() {
    let temp_dir = TempDir::new().unwrap();
    let (console, _) = run_session(
        temp_dir.path(),
        &[
            "1", "1", "", "Milho", "1", "10", "20", "4", "", "5", // culture
            "2", "1", "", "Ureia", "0.5", "", "5", // input
            "3", "", "7", "", // apply
            "4",
        ],
    );

    let transcript = console.transcript();
    assert!(transcript.contains("⚠️ Número inválido!"));
    assert!(!transcript.contains("Total necessário"));
}

#[test]
fn test_records_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    run_session(
        temp_dir.path(),
        &[
            "1", "1", "", "Milho", "1", "10", "20", "4", "", // culture 1
            "1", "", "Café", "2", "5", "5", "", "5", // culture 2
            "2", "1", "", "Ureia", "0.5", "", "5", // input
            "4",
        ],
    );

    let (console, farm) = run_session(temp_dir.path(), &["1", "2", "", "5", "4"]);
    let names: Vec<&str> = farm.cultures().list().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Milho", "Café"]);
    assert_eq!(farm.inputs().len(), 1);

    let transcript = console.transcript();
    assert!(transcript.contains("Cultura 2:"));
    assert!(transcript.contains("📏 Área: 78.54 m²"));
}

#[test]
fn test_abort_token_leaves_files_untouched() {
    let temp_dir = TempDir::new().unwrap();
    run_session(temp_dir.path(), &CREATE_MILHO);
    let cultures_before = read(temp_dir.path(), "culturas.csv");
    let inputs_before = read(temp_dir.path(), "insumos.csv");

    // One abort at each prompt of each operation, then back out and exit.
    let aborts: Vec<Vec<&str>> = vec![
        vec!["1", "1", "#", "5", "4"],
        vec!["1", "1", "", "#", "5", "4"],
        vec!["1", "1", "", "Soja", "#", "5", "4"],
        vec!["1", "1", "", "Soja", "1", "#", "5", "4"],
        vec!["1", "1", "", "Soja", "1", "3", "#", "5", "4"],
        vec!["1", "1", "", "Soja", "1", "3", "4", "#", "5", "4"],
        vec!["1", "3", "", "#", "5", "4"],
        vec!["1", "3", "", "1", "#", "5", "4"],
        vec!["1", "3", "", "1", "1", "#", "5", "4"],
        vec!["1", "3", "", "1", "2", "#", "5", "4"],
        vec!["1", "3", "", "1", "2", "circular", "#", "5", "4"],
        vec!["1", "3", "", "1", "4", " # ", "5", "4"],
        vec!["1", "4", "", "1", "#", "5", "4"],
        vec!["2", "1", "", "Ureia", "#", "5", "4"],
        vec!["3", "#", "4"],
    ];

    for script in aborts {
        let (console, farm) = run_session(temp_dir.path(), &script);
        assert!(
            console.transcript().contains("↩️ Voltando ao menu anterior"),
            "script {:?} did not abort",
            script
        );
        assert_eq!(farm.cultures().len(), 1);
        assert_eq!(farm.cultures().get(1).unwrap().name(), "Milho");
        assert!(farm.inputs().is_empty());
        assert_eq!(read(temp_dir.path(), "culturas.csv"), cultures_before);
        assert_eq!(read(temp_dir.path(), "insumos.csv"), inputs_before);
    }
}

#[test]
fn test_delete_requires_exact_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    run_session(temp_dir.path(), &CREATE_MILHO);
    let before = read(temp_dir.path(), "culturas.csv");

    for answer in ["s", "não", "", "simm", "yes"] {
        let (console, farm) = run_session(temp_dir.path(), &["1", "4", "", "1", answer, "", "5", "4"]);
        assert!(console.transcript().contains("❌ Operação cancelada."));
        assert_eq!(farm.cultures().len(), 1);
        assert_eq!(read(temp_dir.path(), "culturas.csv"), before);
    }

    let (console, farm) = run_session(temp_dir.path(), &["1", "4", "", "1", "sim", "", "5", "4"]);
    assert!(console.transcript().contains("✅ Cultura 'Milho' deletada com sucesso!"));
    assert!(farm.cultures().is_empty());
    assert_eq!(
        read(temp_dir.path(), "culturas.csv").unwrap(),
        "name,shape,total_area,subdivision_count,area_per_subdivision\n"
    );
}

#[test]
fn test_delete_out_of_range_shows_warning() {
    let temp_dir = TempDir::new().unwrap();
    run_session(temp_dir.path(), &CREATE_MILHO);
    let before = read(temp_dir.path(), "culturas.csv");

    let (console, farm) = run_session(temp_dir.path(), &["1", "4", "", "5", "", "5", "4"]);
    assert!(console.transcript().contains("⚠️ Opção inválida! Tente novamente."));
    assert_eq!(farm.cultures().len(), 1);
    assert_eq!(read(temp_dir.path(), "culturas.csv"), before);
}

#[test]
fn test_update_subdivisions_recomputes_area_per_subdivision() {
    let temp_dir = TempDir::new().unwrap();
    run_session(temp_dir.path(), &CREATE_MILHO);

    let (_, farm) = run_session(temp_dir.path(), &["1", "3", "", "1", "4", "8", "", "5", "4"]);
    let culture = farm.cultures().get(1).unwrap();
    assert_eq!(culture.subdivision_count(), 8);
    assert_eq!(culture.area_per_subdivision(), 25.0);
    assert!(read(temp_dir.path(), "culturas.csv")
        .unwrap()
        .contains("Milho,rectangle,200.0,8,25.0"));
}

#[test]
fn test_invalid_update_field_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    run_session(temp_dir.path(), &CREATE_MILHO);
    let before = read(temp_dir.path(), "culturas.csv");

    let (console, _) = run_session(temp_dir.path(), &["1", "3", "", "1", "9", "", "5", "4"]);
    assert!(console.transcript().contains("⚠️ Opção inválida! Tente novamente."));
    assert_eq!(read(temp_dir.path(), "culturas.csv"), before);
}

#[test]
fn test_configured_tokens() {
    let temp_dir = TempDir::new().unwrap();
    run_session(temp_dir.path(), &CREATE_MILHO);

    let config = FarmConfig::from_toml_str(
        "[interface]\nabort_token = \"voltar\"\nconfirm_token = \"yes\"\n",
    )
    .unwrap();

    // "#" is an ordinary answer now, "voltar" aborts.
    let mut session = Session::with_config(
        ScriptedConsole::new(["1", "4", "", "1", "sim", "", "4", "voltar", "5", "4"]),
        open_farm(temp_dir.path()),
        &config,
    );
    session.run().unwrap();
    assert_eq!(session.farm().cultures().len(), 1);
    let transcript = session.console().transcript();
    assert!(transcript.contains("digite voltar."));
    assert!(transcript.contains("(yes/não)"));

    let mut session = Session::with_config(
        ScriptedConsole::new(["1", "4", "", "1", "YES", "", "5", "4"]),
        open_farm(temp_dir.path()),
        &config,
    );
    session.run().unwrap();
    assert!(session.farm().cultures().is_empty());
}
