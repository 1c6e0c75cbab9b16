#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn index(&self) -> usize {
        match self {
            Language::English => 0,
            Language::Spanish => 1,
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::English,
        }
    }

    /// Short caption drawn on a placeholder flag.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "ENG",
            Language::Spanish => "ESP",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKey {
    Title,
    OptionsTitle,
    PlayVsAi,
    PlayCoop,
    OptionsButton,
    Exit,
    Volume,
    Fullscreen,
    Back,
    Language,
    Yes,
    No,
    PlayerOneControls,
    PlayerTwoControls,
    BackToMenu,
    MenuHelp,
}

impl TextKey {
    // One column per language, in `Language::index` order.
    fn strings(&self) -> [&'static str; 2] {
        match self {
            TextKey::Title => ["PONG", "PONG"],
            TextKey::OptionsTitle => ["OPTIONS", "OPCIONES"],
            TextKey::PlayVsAi => ["Play vs AI", "Jugar vs IA"],
            TextKey::PlayCoop => ["Cooperative Play", "Jugar Cooperativo"],
            TextKey::OptionsButton => ["Options", "Opciones"],
            TextKey::Exit => ["Exit", "Salir"],
            TextKey::Volume => ["Volume: {}%", "Volumen: {}%"],
            TextKey::Fullscreen => ["Fullscreen: {}", "Pantalla Completa: {}"],
            TextKey::Back => ["Back", "Atrás"],
            TextKey::Language => ["Language", "Idioma"],
            TextKey::Yes => ["YES", "SÍ"],
            TextKey::No => ["NO", "NO"],
            TextKey::PlayerOneControls => ["W/S move", "W/S mover"],
            TextKey::PlayerTwoControls => ["↑/↓ move", "↑/↓ mover"],
            TextKey::BackToMenu => ["Esc menu", "Esc menú"],
            TextKey::MenuHelp => [
                "Click or ↑/↓ + Enter  │  Q quit",
                "Clic o ↑/↓ + Enter  │  Q salir",
            ],
        }
    }
}

pub fn text(lang: Language, key: TextKey) -> &'static str {
    key.strings()[lang.index()]
}

fn format_one(template: &str, value: &str) -> String {
    template.replacen("{}", value, 1)
}

pub fn volume_label(lang: Language, percent: u32) -> String {
    format_one(text(lang, TextKey::Volume), &percent.to_string())
}

pub fn fullscreen_label(lang: Language, on: bool) -> String {
    let value = text(lang, if on { TextKey::Yes } else { TextKey::No });
    format_one(text(lang, TextKey::Fullscreen), value)
}
