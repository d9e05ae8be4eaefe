use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use companion_ui::dom::{Document, ElementLocator};
use companion_ui::fetch::HttpFragmentFetch;
use companion_ui::reserve::ReservePage;
use companion_ui::scopefns::Also;
use companion_ui::snapshot::PageSnapshot;
use companion_ui::theme;
use companion_ui::widgets::{AuthModal, AuthModalConfig, SliderConfig};

#[derive(Parser, Debug, Clone)]
struct Args {
    #[arg()]
    /// Path to output the page snapshot to, per default: page_snapshot-%Y-%m-%dT%H-%M-%S.json
    output: Option<PathBuf>,

    /// Endpoint serving the registration form fragment
    #[arg(long, default_value = "http://localhost:8000/customer/create/")]
    create_customer_url: String,

    /// How long to wait in milliseconds for the registration fragment before snapshotting
    #[arg(long, default_value_t = 2000)]
    fetch_timeout: u64,

    /// How verbose the output should be, can be set up to 3 times. Has no effect if RUST_LOG is set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to output log to
    #[arg(short, long)]
    log_path: Option<PathBuf>,
}

fn main() {
    color_eyre::install().unwrap();

    let old_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        old_hook(panic_info);
        error!("Backtrace: {:#?}", backtrace);
    }));

    let args = Args::parse();

    tracing_init(&args);

    debug!(?args);

    let document = demo_page();

    let auth = match AuthModal::mount(
        &document,
        AuthModalConfig::new(&args.create_customer_url),
        HttpFragmentFetch,
    ) {
        Ok(modal) => Some(modal),
        Err(error) => {
            warn!(%error, "auth modal not mounted");
            None
        }
    };
    let mut page = ReservePage::mount(&document, SliderConfig::default());

    run_session(&document, auth.as_ref(), &mut page);

    if let Some(modal) = &auth {
        await_fragment(modal, Duration::from_millis(args.fetch_timeout));
    }

    let snapshot = PageSnapshot::new(
        auth.as_ref().map(|modal| modal.snapshot()),
        Some(page.snapshot()),
    );
    write_snapshot(&snapshot, args.output);

    if let Some(log_path) = args.log_path {
        info!("wrote logs to {}", log_path.display());
    }
}

/// Replay a short scripted interaction against the mounted page. The card
/// menu is opened last; everything before it bubbles a click to the
/// document, which would close an already open menu.
fn run_session(
    document: &Document,
    auth: Option<&AuthModal<HttpFragmentFetch>>,
    page: &mut ReservePage,
) {
    if let Some(modal) = auth {
        info!("switching to the registration panel");
        modal.show_registration();
        document.advance(theme::FADE_DURATION);
        debug!(panel = ?modal.active_panel(), "panel swap settled");
    }

    if let Some(star) = document.by_id("star-4") {
        info!("rating the stay");
        star.pointer_enter();
        star.click();
    }

    info!("narrowing the price band");
    if let Some(trigger) = document.by_id(theme::FILTER_TRIGGER_ID) {
        trigger.click();
    }
    if let Some(slider) = page.slider.as_mut() {
        slider.set_range(250, 600);
    }
    if let Some(apply) = document.by_id(theme::FILTER_APPLY_ID) {
        apply.click();
    }

    info!("scrolling past the navbar threshold");
    document.scroll_to(120.0);

    if let Some(menu) = page.menus.first() {
        info!("opening the first card menu");
        menu.card().pointer_enter();
        document.advance(Duration::ZERO);
        menu.arrow().click();
    }
}

/// Poll for the registration fragment until it lands or the timeout
/// passes. The panel swap has long settled either way; a miss only means
/// the container keeps its previous content.
fn await_fragment(modal: &AuthModal<HttpFragmentFetch>, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while modal.snapshot().pending_requests > 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(25));
        modal.poll_responses();
    }

    if modal.snapshot().registration_loaded {
        info!("registration fragment loaded");
    } else {
        warn!("registration fragment did not arrive, container left as-is");
    }
}

fn write_snapshot(snapshot: &PageSnapshot, output: Option<PathBuf>) {
    let file_name = Local::now()
        .format("page_snapshot-%Y-%m-%dT%H-%M-%S.json")
        .to_string();
    let output_file = match output {
        Some(out) => out,
        _ => PathBuf::from(file_name),
    };

    info!("exporting page snapshot");
    match File::create(&output_file) {
        Ok(file) => {
            if let Err(e) = serde_json::to_writer_pretty(&file, snapshot) {
                error!("Failed to write to {}: {}", output_file.display(), e);
            } else {
                info!("wrote output to {}", output_file.canonicalize().unwrap().display());
            }
        }
        Err(e) => {
            error!("Failed to create file at {}: {}", output_file.display(), e);
        }
    }
}

/// Build the fixture tree the demo session runs against: the auth modal
/// region, three reservation cards, the rating stars, the price input,
/// the filter modal and the navbar.
fn demo_page() -> Document {
    let document = Document::new();
    let root = document.root();

    root.append(&document.create("nav").also(|nav| nav.add_class(theme::NAVBAR)));

    root.append(&document.create("div").also(|panel| panel.set_id(theme::LOGIN_PANEL_ID)));
    let registration = document
        .create("div")
        .also(|panel| panel.set_id(theme::REGISTRATION_PANEL_ID));
    registration.append(
        &document
            .create("div")
            .also(|container| container.set_id(theme::REGISTRATION_CONTAINER_ID)),
    );
    root.append(&registration);
    root.append(&document.create("button").also(|b| b.set_id(theme::LOGIN_TOGGLE_ID)));
    root.append(&document.create("button").also(|b| b.set_id(theme::REGISTRATION_TOGGLE_ID)));
    root.append(&document.create("button").also(|b| b.set_id(theme::CREATE_NEW_ID)));

    for _ in 0..3 {
        let card = document.create("div").also(|card| card.add_class(theme::CARD));
        card.append(&document.create("i").also(|arrow| arrow.add_class(theme::CARD_ARROW)));
        card.append(&document.create("div").also(|menu| menu.add_class(theme::CARD_MENU)));
        root.append(&card);
    }

    let stars = document.create("div").also(|s| s.set_id(theme::RATING_ROOT_ID));
    for value in 1..=5u32 {
        stars.append(&document.create("i").also(|star| {
            star.set_id(&format!("star-{value}"));
            star.set_attr(theme::STAR_VALUE_ATTR, &value.to_string());
        }));
    }
    root.append(&stars);
    root.append(&document.create("input").also(|input| input.set_id(theme::RATING_INPUT_ID)));

    root.append(&document.create("input").also(|input| input.set_id(theme::PRICE_INPUT_ID)));

    root.append(&document.create("button").also(|b| b.set_id(theme::FILTER_TRIGGER_ID)));
    let filter = document.create("div").also(|modal| modal.set_id(theme::FILTER_MODAL_ID));
    filter.append(&document.create("button").also(|b| b.set_id(theme::FILTER_APPLY_ID)));
    root.append(&filter);

    document
}

fn tracing_init(args: &Args) {
    tracing_log::LogTracer::init().unwrap();

    fn env_filter(args: &Args) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(
                match args.verbose {
                    0 => "companion_ui=info",
                    1 => "info",
                    2 => "debug",
                    _ => "trace",
                }
                .parse()
                .unwrap(),
            )
            .from_env_lossy()
    }

    let subscriber = tracing_subscriber::fmt::fmt()
        .with_ansi(false)
        .with_env_filter(env_filter(args))
        .finish();

    let file_log = if let Some(log_path) = &args.log_path {
        let log_file = File::create(log_path).unwrap();
        let file_log = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(Mutex::new(log_file))
            .with_filter(tracing::level_filters::LevelFilter::TRACE);
        Some(file_log)
    } else {
        None
    };

    let subscriber = subscriber.with(file_log);

    tracing::subscriber::set_global_default(subscriber).expect("unable to set up logging");
}
