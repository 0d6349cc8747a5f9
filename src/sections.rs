#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DisplayMode {
    Dark,
    Light,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Background {
    Image(&'static str),
    Video(&'static str),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub background: Option<Background>,
    pub display_mode: DisplayMode,
    pub is_horizontal: bool,
}

impl Section {
    pub fn element_id(&self) -> String {
        format!("section-{}", self.id)
    }
}

pub fn site_sections() -> Vec<Section> {
    vec![
        Section {
            id: "hero",
            title: "Where ideas take shape.",
            description: "We craft digital experiences that turn visitors into customers and rough ideas into profitable products.",
            background: Some(Background::Video("/api/video/hero")),
            display_mode: DisplayMode::Dark,
            is_horizontal: false,
        },
        Section {
            id: "studio",
            title: "Design + development + strategy.",
            description: "Why hire three agencies when one team covers world-class design, bulletproof engineering, and business strategy under one roof?",
            background: Some(Background::Video("/api/video/studio")),
            display_mode: DisplayMode::Dark,
            is_horizontal: false,
        },
        Section {
            id: "launch",
            title: "From zero to launch in record time.",
            description: "Complete digital products in two to six weeks. Modern stack, clean code, designs that sell.",
            background: Some(Background::Video("/api/video/launch")),
            display_mode: DisplayMode::Light,
            is_horizontal: false,
        },
        Section {
            id: "clients",
            title: "Words from the people who trust us.",
            description: "“Working with Voidworks feels like having a world-class team in-house. They understand business, not just code.” — Marcus, CEO @ DataSync",
            background: Some(Background::Video("/api/video/clients")),
            display_mode: DisplayMode::Light,
            is_horizontal: false,
        },
        Section {
            id: "work",
            title: "Recent wins.",
            description: "From fintech dashboards to creator platforms — swipe through what we've shipped.",
            background: Some(Background::Image("/images/work-grid.jpg")),
            display_mode: DisplayMode::Light,
            is_horizontal: true,
        },
        Section {
            id: "process",
            title: "How we work.",
            description: "Weekly releases. Async by default. Figma to production in days, not months.",
            background: Some(Background::Video("/api/video/process")),
            display_mode: DisplayMode::Dark,
            is_horizontal: false,
        },
        Section {
            id: "start-project",
            title: "You bring the vision.",
            description: "We'll bring it to life — tell us what you're building and we'll come back within a day. Takes two minutes, no commitment.",
            background: Some(Background::Video("/api/video/contact")),
            display_mode: DisplayMode::Dark,
            is_horizontal: false,
        },
    ]
}
