use console::Style;
use folio_core::headless::HeadlessDocument;
use folio_core::registry::LoadState;
use folio_core::{PageHost, Viewer};

use crate::catalog::{PageProbe, ProbeStatus};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    bad: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            bad: Style::new().red(),
            path: Style::new().underlined(),
        }
    }
}

/// Counters collected while a session runs.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub steps: usize,
    pub window_checks: usize,
    pub attached: usize,
    pub failed: usize,
    pub page_changes: usize,
}

pub fn print_catalog_summary(title: Option<&str>, base: &str, probes: &[PageProbe]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(title.unwrap_or("Untitled catalog")));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();
    println!("  {:<14}{}", s.label.apply_to("Location"), s.path.apply_to(base));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pages"),
        s.value.apply_to(probes.len())
    );
    println!();

    for probe in probes {
        let status = match &probe.status {
            ProbeStatus::Ok { width, height } => {
                s.good.apply_to(format!("{}x{}", width, height))
            }
            ProbeStatus::Missing => s.bad.apply_to("missing".to_string()),
            ProbeStatus::Undecodable(e) => s.bad.apply_to(format!("unreadable ({})", e)),
            ProbeStatus::Remote => s.label.apply_to("remote".to_string()),
        };
        println!(
            "    {:<12}{}",
            s.label.apply_to(format!("Page {}", probe.index + 1)),
            status
        );
    }

    let broken = probes.iter().filter(|p| p.fails_to_load()).count();
    if broken > 0 {
        println!();
        println!(
            "  {} {}",
            s.bad.apply_to(broken),
            s.bad.apply_to("page(s) will fail to load")
        );
    }
    println!();
}

pub fn print_session_summary(viewer: &Viewer<HeadlessDocument>, stats: &SessionStats) {
    let s = Styles::new();
    let host = viewer.host();

    println!();
    println!("  {}", s.title.apply_to("Reading Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<18}{} / {}",
        s.label.apply_to("Current page"),
        s.value.apply_to(viewer.current_page() + 1),
        s.value.apply_to(viewer.catalog().len())
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Ready"),
        flag(&s, viewer.is_ready())
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Infinite scroll"),
        flag(&s, viewer.is_infinite_scroll())
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Indicator"),
        match host.indicator_visible() {
            Some(true) => s.good.apply_to("shown"),
            Some(false) => s.label.apply_to("hidden"),
            None => s.label.apply_to("unset"),
        }
    );
    println!();

    println!("  {}", s.header.apply_to("Document"));
    let order: Vec<String> = host
        .page_order()
        .iter()
        .map(|i| (i + 1).to_string())
        .collect();
    println!(
        "    {:<16}{}",
        s.label.apply_to("Attached pages"),
        s.value.apply_to(order.join(", "))
    );
    let failed: Vec<String> = viewer
        .slots()
        .iter()
        .filter(|slot| slot.state == LoadState::Failed)
        .map(|slot| (slot.index + 1).to_string())
        .collect();
    if !failed.is_empty() {
        println!(
            "    {:<16}{}",
            s.label.apply_to("Failed pages"),
            s.bad.apply_to(failed.join(", "))
        );
    }
    println!(
        "    {:<16}{} / {}",
        s.label.apply_to("Scroll"),
        s.value.apply_to(format!("{:.0}", host.scroll_top())),
        s.value.apply_to(format!("{:.0}", host.document_height()))
    );
    let t = viewer.transform();
    println!(
        "    {:<16}{}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!(
            "{:.2}x  pan ({:.0}, {:.0})",
            t.zoom, t.pan.x, t.pan.y
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Activity"));
    for (label, count) in [
        ("Script steps", stats.steps),
        ("Window checks", stats.window_checks),
        ("Pages attached", stats.attached),
        ("Load failures", stats.failed),
        ("Page changes", stats.page_changes),
    ] {
        println!("    {:<16}{}", s.label.apply_to(label), s.value.apply_to(count));
    }
    println!();
}

fn flag(s: &Styles, on: bool) -> console::StyledObject<&'static str> {
    if on {
        s.good.apply_to("yes")
    } else {
        s.bad.apply_to("no")
    }
}
