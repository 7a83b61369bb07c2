/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    ManageCultures,
    ManageInputs,
    ApplyInput,
    Exit,
}

impl MainCommand {
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::ManageCultures),
            "2" => Some(Self::ManageInputs),
            "3" => Some(Self::ApplyInput),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Entries shared by the culture and input sub-menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCommand {
    Create,
    List,
    Update,
    Delete,
    Back,
}

impl RecordCommand {
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Create),
            "2" => Some(Self::List),
            "3" => Some(Self::Update),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Back),
            _ => None,
        }
    }
}
