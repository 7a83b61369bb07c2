use crate::core::calculator;
use crate::core::culture_store::CultureChange;
use crate::core::input_store::InputChange;
use crate::core::menu::{MainCommand, RecordCommand};
use crate::core::{ConfigProvider, Console, Farm, Storage};
use crate::domain::model::{Culture, Geometry, Input, Shape};
use crate::utils::error::{FarmError, Result};
use crate::utils::validation::{
    parse_number, parse_positive_count, parse_positive_number, parse_selection,
    validate_non_empty_string,
};

pub const DEFAULT_ABORT_TOKEN: &str = "#";
pub const DEFAULT_CONFIRM_TOKEN: &str = "sim";

const RULE_WIDTH: usize = 50;
const PICK_OPTION: &str = "👉 Digite o número da opção desejada: ";
const INVALID_OPTION: &str = "⚠️ Opção inválida! Tente novamente.\n";
const INVALID_NUMBER: &str = "⚠️ Número inválido!\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Culture,
    Input,
}

/// The menu state machine. Talks to the user only through `C` and to the
/// records only through the [`Farm`].
pub struct Session<C: Console, S: Storage> {
    console: C,
    farm: Farm<S>,
    abort_token: String,
    confirm_token: String,
}

impl<C: Console, S: Storage> Session<C, S> {
    pub fn new(console: C, farm: Farm<S>) -> Self {
        Self {
            console,
            farm,
            abort_token: DEFAULT_ABORT_TOKEN.to_string(),
            confirm_token: DEFAULT_CONFIRM_TOKEN.to_string(),
        }
    }

    pub fn with_config<P: ConfigProvider>(console: C, farm: Farm<S>, config: &P) -> Self {
        Self {
            console,
            farm,
            abort_token: config.abort_token().trim().to_string(),
            confirm_token: config.confirm_token().trim().to_string(),
        }
    }

    pub fn farm(&self) -> &Farm<S> {
        &self.farm
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_parts(self) -> (C, Farm<S>) {
        (self.console, self.farm)
    }

    /// Runs until the user exits or the input stream ends.
    pub fn run(&mut self) -> Result<()> {
        match self.main_loop() {
            Err(FarmError::InputClosed) => {
                tracing::info!("Input closed, leaving session");
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            self.show_main_menu();
            let choice = self.console.ask(PICK_OPTION)?;
            match MainCommand::parse(&choice) {
                Some(MainCommand::ManageCultures) => self.record_loop(RecordKind::Culture)?,
                Some(MainCommand::ManageInputs) => self.record_loop(RecordKind::Input)?,
                Some(MainCommand::ApplyInput) => self.apply_input()?,
                Some(MainCommand::Exit) => {
                    self.console
                        .show("\n✅ Programa encerrado. Até logo, agricultor! 🌱\n");
                    return Ok(());
                }
                None => self.warn(&format!("\n{}", INVALID_OPTION))?,
            }
        }
    }

    fn record_loop(&mut self, kind: RecordKind) -> Result<()> {
        loop {
            self.show_record_menu(kind);
            let choice = self.console.ask(PICK_OPTION)?;
            if self.is_abort(&choice) {
                return Ok(());
            }

            match (kind, RecordCommand::parse(&choice)) {
                (_, Some(RecordCommand::Back)) => return Ok(()),
                (RecordKind::Culture, Some(RecordCommand::Create)) => self.create_culture()?,
                (RecordKind::Culture, Some(RecordCommand::List)) => self.list_cultures()?,
                (RecordKind::Culture, Some(RecordCommand::Update)) => self.update_culture()?,
                (RecordKind::Culture, Some(RecordCommand::Delete)) => self.delete_culture()?,
                (RecordKind::Input, Some(RecordCommand::Create)) => self.create_input()?,
                (RecordKind::Input, Some(RecordCommand::List)) => self.list_inputs()?,
                (RecordKind::Input, Some(RecordCommand::Update)) => self.update_input()?,
                (RecordKind::Input, Some(RecordCommand::Delete)) => self.delete_input()?,
                (_, None) => self.warn(&format!("\n{}", INVALID_OPTION))?,
            }
        }
    }

    // ---- cultures ----

    fn create_culture(&mut self) -> Result<()> {
        if !self.instruction()? {
            return Ok(());
        }
        self.header("🌱 Cadastro de Cultura 🌱");

        let Some(name) = self.prompt("\n👉 Digite o nome da cultura: ")? else {
            return Ok(());
        };
        if let Err(e) = validate_non_empty_string("nome", &name) {
            return self.reject(e);
        }

        self.console.show("\nQual o formato da área de plantio?");
        self.console.show("[1] Retângulo");
        self.console.show("[2] Círculo");
        let Some(choice) = self.prompt(PICK_OPTION)? else {
            return Ok(());
        };
        let shape = match choice.as_str() {
            "1" => Shape::Rectangle,
            "2" => Shape::Circle,
            _ => return self.warn(INVALID_OPTION),
        };

        let Some(geometry) = self.ask_geometry(shape)? else {
            return Ok(());
        };
        self.console.show(&format!(
            "De acordo com essas informações, esse terreno {} possui uma área de {:.2} m²!",
            shape,
            geometry.area()
        ));

        let Some(raw) = self.prompt("Digite quantas ruas há nessa lavoura: ")? else {
            return Ok(());
        };
        let subdivisions = match parse_positive_count("ruas", &raw) {
            Ok(count) => count,
            Err(e) => return self.reject(e),
        };

        let culture = self
            .farm
            .create_culture(name, geometry, subdivisions)?
            .clone();
        tracing::info!("🌾 Culture '{}' registered", culture.name());

        self.console.show("\n✅ Cultura cadastrada com sucesso!");
        self.console.show("");
        self.show_culture(&culture);
        self.pause()
    }

    fn list_cultures(&mut self) -> Result<()> {
        self.header("📋 Lista de Culturas Cadastradas");

        if self.farm.cultures().is_empty() {
            return self.warn("\n⚠️ Nenhuma cultura cadastrada.\n");
        }

        let cultures = self.farm.cultures().list().to_vec();
        for (i, culture) in cultures.iter().enumerate() {
            self.console.show(&format!("\nCultura {}:", i + 1));
            self.show_culture(culture);
        }
        self.pause()
    }

    fn update_culture(&mut self) -> Result<()> {
        if !self.instruction()? {
            return Ok(());
        }
        self.header("✏️  Atualizar Cultura");

        let Some(index) = self.select_culture("\nDigite o número da cultura que deseja atualizar: ")?
        else {
            return Ok(());
        };
        let culture = self.farm.cultures().get(index)?.clone();

        self.console
            .show(&format!("\nCultura selecionada: {}", culture.name()));
        self.console.show("Quais dados você deseja alterar?");
        self.console.show("[1] Nome");
        self.console.show("[2] Formato");
        self.console.show("[3] Área");
        self.console.show("[4] Ruas");
        let Some(option) = self.prompt(PICK_OPTION)? else {
            return Ok(());
        };

        let change = match option.as_str() {
            "1" => {
                let Some(name) = self.prompt("Novo nome: ")? else {
                    return Ok(());
                };
                if let Err(e) = validate_non_empty_string("nome", &name) {
                    return self.reject(e);
                }
                CultureChange::Name(name)
            }
            "2" => {
                let Some(shape) = self.ask_new_shape()? else {
                    return Ok(());
                };
                let Some(geometry) = self.ask_geometry(shape)? else {
                    return Ok(());
                };
                CultureChange::Geometry(geometry)
            }
            "3" => {
                let Some(geometry) = self.ask_geometry(culture.shape())? else {
                    return Ok(());
                };
                CultureChange::Geometry(geometry)
            }
            "4" => {
                let Some(raw) = self.prompt("Novo número de ruas: ")? else {
                    return Ok(());
                };
                match parse_positive_count("ruas", &raw) {
                    Ok(count) => CultureChange::Subdivisions(count),
                    Err(e) => return self.reject(e),
                }
            }
            _ => return self.warn(INVALID_OPTION),
        };

        let updated = self.farm.update_culture(index, change)?.clone();
        tracing::info!("✏️ Culture #{} updated", index);

        self.console.show("\n✅ Cultura atualizada com sucesso!\n");
        self.show_culture(&updated);
        self.pause()
    }

    fn delete_culture(&mut self) -> Result<()> {
        if !self.instruction()? {
            return Ok(());
        }
        self.header("🗑️  Deletar Cultura");

        let Some(index) = self.select_culture("\nDigite o número da cultura que deseja deletar: ")?
        else {
            return Ok(());
        };
        let name = self.farm.cultures().get(index)?.name().to_string();

        let question = format!(
            "Tem certeza que deseja deletar a cultura '{}'? ({}/não): ",
            name, self.confirm_token
        );
        let Some(answer) = self.prompt(&question)? else {
            return Ok(());
        };

        if self.is_confirmed(&answer) {
            self.farm.delete_culture(index)?;
            tracing::info!("🗑️ Culture #{} deleted", index);
            self.console
                .show(&format!("\n✅ Cultura '{}' deletada com sucesso!\n", name));
        } else {
            self.console.show("\n❌ Operação cancelada.\n");
        }
        self.pause()
    }

    /// Lists culture names and reads a valid 1-based pick. `None` when the
    /// store is empty, the user aborted, or the pick was rejected.
    fn select_culture(&mut self, question: &str) -> Result<Option<usize>> {
        if self.farm.cultures().is_empty() {
            self.warn("⚠️ Nenhuma cultura cadastrada.\n")?;
            return Ok(None);
        }

        let names: Vec<String> = self
            .farm
            .cultures()
            .list()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        self.show_numbered(&names);

        self.select(question, names.len(), INVALID_OPTION)
    }

    fn ask_new_shape(&mut self) -> Result<Option<Shape>> {
        loop {
            let Some(answer) = self.prompt("Novo formato (retangular/circular): ")? else {
                return Ok(None);
            };
            match answer.to_lowercase().as_str() {
                "retangular" | "1" => return Ok(Some(Shape::Rectangle)),
                "circular" | "2" => return Ok(Some(Shape::Circle)),
                _ => self.console.show(
                    "⚠️ Opção inválida! Precisa ser 'retangular' ou 'circular'. Tente novamente.\n",
                ),
            }
        }
    }

    /// Reads the dimensions for `shape`. A bad number aborts the operation.
    fn ask_geometry(&mut self, shape: Shape) -> Result<Option<Geometry>> {
        let geometry = match shape {
            Shape::Rectangle => {
                let Some(width) =
                    self.ask_dimension("largura", "Digite a largura do terreno (em metros): ")?
                else {
                    return Ok(None);
                };
                let Some(length) = self.ask_dimension(
                    "comprimento",
                    "Digite o comprimento do terreno (em metros): ",
                )?
                else {
                    return Ok(None);
                };
                Geometry::Rectangle { width, length }
            }
            Shape::Circle => {
                let Some(radius) =
                    self.ask_dimension("raio", "Digite o raio do terreno (em metros): ")?
                else {
                    return Ok(None);
                };
                Geometry::Circle { radius }
            }
        };
        Ok(Some(geometry))
    }

    fn ask_dimension(&mut self, field: &str, question: &str) -> Result<Option<f64>> {
        let Some(raw) = self.prompt(question)? else {
            return Ok(None);
        };
        match parse_positive_number(field, &raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.reject(e)?;
                Ok(None)
            }
        }
    }

    fn show_culture(&mut self, culture: &Culture) {
        self.console.show(&format!("🌾 Nome: {}", culture.name()));
        self.console.show(&format!("📐 Formato: {}", culture.shape()));
        self.console
            .show(&format!("📏 Área: {:.2} m²", culture.total_area()));
        self.console.show(&format!(
            "🛤️ Quantidade de ruas: {}",
            culture.subdivision_count()
        ));
        self.console.show(&format!(
            "🧩 Área por rua: {:.2} m²",
            culture.area_per_subdivision()
        ));
    }

    // ---- inputs ----

    fn create_input(&mut self) -> Result<()> {
        if !self.instruction()? {
            return Ok(());
        }
        self.header("🧪 Cadastro de Insumo 🧪");

        let Some(name) = self.prompt("👉 Digite o nome do insumo: ")? else {
            return Ok(());
        };
        if let Err(e) = validate_non_empty_string("nome", &name) {
            return self.reject(e);
        }

        let Some(dose) = self.ask_dose("👉 Digite a dose de aplicação (em litros por m²): ")?
        else {
            return Ok(());
        };

        let input = self.farm.create_input(name, dose)?.clone();
        tracing::info!("🧪 Input '{}' registered", input.name);

        self.console.show("\n✅ Insumo cadastrado com sucesso!");
        self.show_input(&input);
        self.pause()
    }

    fn list_inputs(&mut self) -> Result<()> {
        self.header("📋 Lista de Insumos Cadastrados");

        if self.farm.inputs().is_empty() {
            return self.warn("⚠️ Nenhum insumo cadastrado.\n");
        }

        let inputs = self.farm.inputs().list().to_vec();
        for (i, input) in inputs.iter().enumerate() {
            self.console.show(&format!("\nInsumo {}:", i + 1));
            self.show_input(input);
        }
        self.pause()
    }

    fn update_input(&mut self) -> Result<()> {
        if !self.instruction()? {
            return Ok(());
        }
        self.header("✏️  Atualizar Insumo");

        let Some(index) = self.select_input("\nDigite o número do insumo que deseja atualizar: ")?
        else {
            return Ok(());
        };
        let name = self.farm.inputs().get(index)?.name.clone();

        self.console.show(&format!("\nInsumo selecionado: {}", name));
        self.console.show("Quais dados você deseja alterar?");
        self.console.show("[1] Nome");
        self.console.show("[2] Dose");
        let Some(option) = self.prompt(PICK_OPTION)? else {
            return Ok(());
        };

        let change = match option.as_str() {
            "1" => {
                let Some(name) = self.prompt("Novo nome do insumo: ")? else {
                    return Ok(());
                };
                if let Err(e) = validate_non_empty_string("nome", &name) {
                    return self.reject(e);
                }
                InputChange::Name(name)
            }
            "2" => {
                let Some(dose) = self.ask_dose("Nova dose (em L/m²): ")? else {
                    return Ok(());
                };
                InputChange::Dose(dose)
            }
            _ => return self.warn(INVALID_OPTION),
        };

        let updated = self.farm.update_input(index, change)?.clone();
        tracing::info!("✏️ Input #{} updated", index);

        self.console.show("\n✅ Insumo atualizado com sucesso!\n");
        self.show_input(&updated);
        self.pause()
    }

    fn delete_input(&mut self) -> Result<()> {
        if !self.instruction()? {
            return Ok(());
        }
        self.header("🗑️  Deletar Insumo");

        let Some(index) = self.select_input("\nDigite o número do insumo que deseja deletar: ")?
        else {
            return Ok(());
        };
        let name = self.farm.inputs().get(index)?.name.clone();

        let question = format!(
            "Tem certeza que deseja deletar o insumo '{}'? ({}/não): ",
            name, self.confirm_token
        );
        let Some(answer) = self.prompt(&question)? else {
            return Ok(());
        };

        if self.is_confirmed(&answer) {
            self.farm.delete_input(index)?;
            tracing::info!("🗑️ Input #{} deleted", index);
            self.console
                .show(&format!("\n✅ Insumo '{}' deletado com sucesso!\n", name));
        } else {
            self.console.show("\n❌ Operação cancelada.\n");
        }
        self.pause()
    }

    fn select_input(&mut self, question: &str) -> Result<Option<usize>> {
        if self.farm.inputs().is_empty() {
            self.warn("⚠️ Nenhum insumo cadastrado.\n")?;
            return Ok(None);
        }

        let names: Vec<String> = self
            .farm
            .inputs()
            .list()
            .iter()
            .map(|i| i.name.clone())
            .collect();
        self.show_numbered(&names);

        self.select(question, names.len(), INVALID_OPTION)
    }

    /// Re-asks until the answer is a non-negative number or the abort token.
    fn ask_dose(&mut self, question: &str) -> Result<Option<f64>> {
        loop {
            let Some(raw) = self.prompt(question)? else {
                return Ok(None);
            };
            match parse_number("dose", &raw) {
                Ok(dose) if dose >= 0.0 => return Ok(Some(dose)),
                Ok(_) => self.console.show("⚠️ A dose não pode ser negativa.\n"),
                Err(e) => {
                    tracing::warn!("Rejected dose: {}", e);
                    self.console
                        .show("⚠️ Valor inválido! Digite um número, por exemplo: 0.5\n");
                }
            }
        }
    }

    fn show_input(&mut self, input: &Input) {
        self.console.show(&format!("🧪 Nome: {}", input.name));
        self.console
            .show(&format!("💧 Dose: {} L/m²", input.dose_per_area));
    }

    // ---- application ----

    fn apply_input(&mut self) -> Result<()> {
        if !self.instruction()? {
            return Ok(());
        }
        self.header("💧 Aplicar Insumo em Cultura");

        if self.farm.cultures().is_empty() {
            return self.warn("⚠️ Nenhuma cultura cadastrada.\n");
        }
        if self.farm.inputs().is_empty() {
            return self.warn("⚠️ Nenhum insumo cadastrado.\n");
        }

        self.console.show("\nCulturas disponíveis:");
        let cultures: Vec<String> = self
            .farm
            .cultures()
            .list()
            .iter()
            .map(|c| {
                format!(
                    "{} (Área: {:.2} m², Ruas: {})",
                    c.name(),
                    c.total_area(),
                    c.subdivision_count()
                )
            })
            .collect();
        self.show_numbered(&cultures);
        let Some(culture_index) =
            self.select("\nDigite o número da cultura: ", cultures.len(), INVALID_NUMBER)?
        else {
            return Ok(());
        };

        self.console.show("\nInsumos disponíveis:");
        let inputs: Vec<String> = self
            .farm
            .inputs()
            .list()
            .iter()
            .map(|i| format!("{} (Dose: {} L/m²)", i.name, i.dose_per_area))
            .collect();
        self.show_numbered(&inputs);
        let Some(input_index) =
            self.select("\nDigite o número do insumo: ", inputs.len(), INVALID_NUMBER)?
        else {
            return Ok(());
        };

        let culture = self.farm.cultures().get(culture_index)?.clone();
        let input = self.farm.inputs().get(input_index)?.clone();
        let application = calculator::calculate(&culture, &input);
        tracing::debug!(
            "Applied '{}' to '{}': {:.2} L total",
            input.name,
            culture.name(),
            application.total
        );

        self.console.show("\n✅ Cálculo realizado com sucesso!");
        self.console.show(&format!("🌾 Cultura: {}", culture.name()));
        self.console.show(&format!("🧪 Insumo: {}", input.name));
        self.console
            .show(&format!("📏 Área total: {:.2} m²", culture.total_area()));
        self.console
            .show(&format!("💧 Dose: {} L/m²", input.dose_per_area));
        self.console
            .show(&format!("🔢 Ruas: {}", culture.subdivision_count()));
        self.console.show(&format!(
            "📊 Total necessário: {:.2} litros",
            application.total
        ));
        self.console.show(&format!(
            "🛤️ Insumo por rua: {:.2} litros\n",
            application.per_subdivision
        ));
        self.pause()
    }

    // ---- shared prompts ----

    /// Asks a question inside an operation. `None` means the user typed the
    /// abort token and the operation must stop without side effects.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        let answer = self.console.ask(question)?;
        if self.is_abort(&answer) {
            tracing::debug!("Operation aborted by user");
            self.console.show("↩️ Voltando ao menu anterior ...\n");
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }

    fn select(&mut self, question: &str, len: usize, invalid: &str) -> Result<Option<usize>> {
        let Some(raw) = self.prompt(question)? else {
            return Ok(None);
        };
        match parse_selection(&raw, len) {
            Ok(index) => Ok(Some(index)),
            Err(e) => {
                tracing::warn!("Rejected selection: {}", e);
                self.warn(invalid)?;
                Ok(None)
            }
        }
    }

    /// Returns `false` when the user aborted right away.
    fn instruction(&mut self) -> Result<bool> {
        let notice = format!(
            "\n Atenção: Caso precise retornar a qualquer momento, digite {}.",
            self.abort_token
        );
        self.console.show(&notice);
        self.console.show("");
        Ok(self.prompt("👉 Pressione ENTER para continuar")?.is_some())
    }

    fn pause(&mut self) -> Result<()> {
        self.console.show("");
        self.console.ask("👉 Pressione ENTER para voltar ao menu")?;
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        self.console.show(message);
        self.pause()
    }

    fn reject(&mut self, error: FarmError) -> Result<()> {
        tracing::warn!("Rejected input: {}", error);
        self.warn(&format!("⚠️ {}\n", error.user_friendly_message()))
    }

    fn is_abort(&self, answer: &str) -> bool {
        answer.trim() == self.abort_token
    }

    fn is_confirmed(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.confirm_token.to_lowercase()
    }

    fn header(&mut self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.console.show(&format!("\n{}", rule));
        self.console.show(title);
        self.console.show(&rule);
    }

    fn show_numbered(&mut self, lines: &[String]) {
        for (i, line) in lines.iter().enumerate() {
            self.console.show(&format!("{}. {}", i + 1, line));
        }
    }

    fn show_main_menu(&mut self) {
        self.header("🌱  Bem-vindo ao FarmTech - Gestão Agrícola");
        self.console.show("\nO que você gostaria de fazer hoje?\n");
        self.console.show("[1] 🌾 Gerenciar Culturas");
        self.console.show("[2] 🧪 Gerenciar Insumos");
        self.console.show("[3] 💧 Aplicar Insumo em Cultura");
        self.console.show("[4] 🚪 Sair do Programa");
        self.console.show(&"-".repeat(RULE_WIDTH));
    }

    fn show_record_menu(&mut self, kind: RecordKind) {
        let (title, noun) = match kind {
            RecordKind::Culture => ("🌱  FarmTech - Gestão de Culturas 🌱", "cultura"),
            RecordKind::Input => ("🧪  FarmTech - Gestão de Insumos 🧪", "insumo"),
        };
        let (new, plural, article) = match kind {
            RecordKind::Culture => ("nova", "culturas cadastradas", "uma"),
            RecordKind::Input => ("novo", "insumos cadastrados", "um"),
        };

        self.header(title);
        self.console.show("\nO que você deseja fazer?\n");
        self.console
            .show(&format!("[1] ➕ Cadastrar {} {}", new, noun));
        self.console.show(&format!("[2] 📋 Listar {}", plural));
        self.console
            .show(&format!("[3] ✏️  Atualizar dados de {} {}", article, noun));
        self.console
            .show(&format!("[4] 🗑️  Deletar dados de {} {}", article, noun));
        self.console.show("[5] 🔙 Voltar ao Menu Principal");
        self.console.show(&"-".repeat(RULE_WIDTH));
    }
}
