//! condy TUI — ratatui shell around the driver selector and the access
//! request form.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use condy_core::{config::Config, Candidate};

/// Start the TUI over `candidates` and block until the user quits.
pub fn run(config: Config, candidates: Vec<Candidate>, theme: theme::Theme) -> anyhow::Result<()> {
    tracing::info!(candidates = candidates.len(), theme = %config.ui.theme, "starting tui");
    App::new(candidates, config, theme).run()
}

// ---------------------------------------------------------------------------
// Demo data — used when no candidates file is given
// ---------------------------------------------------------------------------

/// A small built-in driver directory.
pub fn demo_drivers() -> Vec<Candidate> {
    const DRIVERS: &[(&str, &str, &str)] = &[
        ("drv-01", "Ana Silva", "ABC1234"),
        ("drv-02", "Bruno Costa", "XYZ9999"),
        ("drv-03", "Anderson Lima", "RST2B34"),
        ("drv-04", "Carla Dias", "QWE1A23"),
        ("drv-05", "Diego Souza", "LMN4567"),
        ("drv-06", "Fernanda Rocha", "GHJ8C90"),
        ("drv-07", "Gustavo Pereira", "KLO3210"),
        ("drv-08", "Helena Martins", "PQR5D67"),
        ("drv-09", "Igor Almeida", "TUV6543"),
        ("drv-10", "Joana Ribeiro", "WXY7E89"),
        ("drv-11", "Leonardo Teixeira", "BCD1122"),
        ("drv-12", "Marta Gomes", "EFG3344"),
    ];

    let mut drivers: Vec<Candidate> = DRIVERS
        .iter()
        .map(|(id, name, plate)| {
            Candidate::new()
                .with_id(*id)
                .with_field("name", *name)
                .with_field("plate", *plate)
        })
        .collect();

    // One record without a name, shown with the placeholder text
    drivers.push(Candidate::new().with_id("drv-13").with_field("plate", "NOP0001"));
    drivers
}
