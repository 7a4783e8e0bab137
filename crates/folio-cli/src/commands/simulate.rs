use std::cell::Cell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Args;
use folio_core::headless::HeadlessDocument;
use folio_core::input::ImageOutcome;
use folio_core::observer::ViewerObserver;
use folio_core::Viewer;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::catalog::LoadedCatalog;
use crate::script::Script;
use crate::summary::{print_session_summary, SessionStats};

#[derive(Args)]
pub struct SimulateArgs {
    /// Catalog manifest (TOML) or directory of page images
    pub catalog: PathBuf,

    /// Session script (TOML list of steps)
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Browser viewport height in pixels
    #[arg(long, default_value = "900")]
    pub viewport_height: f64,

    /// Width of the page column in pixels
    #[arg(long, default_value = "800")]
    pub column_width: f64,

    /// Header height in pixels
    #[arg(long)]
    pub header: Option<f64>,

    /// Footer height in pixels
    #[arg(long)]
    pub footer: Option<f64>,

    /// Start with a jump to page 1 instead of the initial preload
    #[arg(long)]
    pub no_preload: bool,
}

/// Forwards viewer activity to a progress bar and session counters.
struct SessionObserver {
    pb: ProgressBar,
    window_checks: Cell<usize>,
    attached: Cell<usize>,
    failed: Cell<usize>,
    page_changes: Cell<usize>,
}

impl SessionObserver {
    fn new(pb: ProgressBar) -> Self {
        Self {
            pb,
            window_checks: Cell::new(0),
            attached: Cell::new(0),
            failed: Cell::new(0),
            page_changes: Cell::new(0),
        }
    }

    fn stats(&self, steps: usize) -> SessionStats {
        SessionStats {
            steps,
            window_checks: self.window_checks.get(),
            attached: self.attached.get(),
            failed: self.failed.get(),
            page_changes: self.page_changes.get(),
        }
    }
}

impl ViewerObserver for SessionObserver {
    fn window_checked(&self) {
        self.window_checks.set(self.window_checks.get() + 1);
    }

    fn slot_attached(&self, index: usize) {
        self.attached.set(self.attached.get() + 1);
        self.pb.set_message(format!("Loading page {}", index + 1));
    }

    fn slot_settled(&self, _index: usize, outcome: ImageOutcome) {
        if outcome == ImageOutcome::Failed {
            self.failed.set(self.failed.get() + 1);
        }
        self.pb.inc(1);
    }

    fn page_changed(&self, _index: usize) {
        self.page_changes.set(self.page_changes.get() + 1);
    }

    fn ready(&self) {
        self.pb.println("Viewer ready");
    }
}

pub fn run(args: &SimulateArgs) -> Result<()> {
    let config = super::config::load(args.config.as_ref())?;
    let loaded = LoadedCatalog::open(&args.catalog)?;
    let script = match args.script {
        Some(ref path) => Script::load(path)?,
        None => Script::default(),
    };

    let probes = loaded.probe();
    let failing: HashSet<usize> = probes
        .iter()
        .filter(|p| p.fails_to_load())
        .map(|p| p.index)
        .collect();
    let heights: Vec<(usize, f64)> = probes
        .iter()
        .filter_map(|p| p.scaled_height(args.column_width).map(|h| (p.index, h)))
        .collect();

    let mut doc = HeadlessDocument::new(args.viewport_height)
        .with_page_height(args.viewport_height)
        .with_page_heights(heights);
    if let Some(h) = args.header {
        doc = doc.with_header(h);
    }
    if let Some(h) = args.footer {
        doc = doc.with_footer(h);
    }

    let total = loaded.catalog.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let observer = Rc::new(SessionObserver::new(pb.clone()));
    let priority = config.loading.priority_pages;
    let mut viewer = Viewer::new(doc, loaded.catalog, config)?.with_observer(observer.clone());
    let outcome_for = |index: usize| {
        if failing.contains(&index) {
            ImageOutcome::Failed
        } else {
            ImageOutcome::Loaded
        }
    };

    if args.no_preload {
        viewer.goto_page(0);
    } else {
        viewer.preload_initial_window(priority);
    }
    viewer.settle_all(outcome_for);
    pb.finish_with_message("Pages settled");

    for (n, step) in script.steps.iter().enumerate() {
        let handled = step.apply(&mut viewer);
        viewer.settle_all(outcome_for);
        info!(step = n + 1, ?handled, "{}", step.describe());
        println!(
            "{:>4}  {:<32} page {:>3}  {:?}",
            n + 1,
            step.describe(),
            viewer.current_page() + 1,
            handled
        );
    }

    print_session_summary(&viewer, &observer.stats(script.steps.len()));
    viewer.teardown();
    Ok(())
}
