use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;
use goldpan::config::ConfigLoader;
use goldpan::dom::{Document, MemoryDocument, Selector};
use goldpan::engine::SearchController;
use goldpan::FilterOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SAMPLE_PAGE: &str = "\
<input id=\"search\" value=\"\">\
<ul>\
  <li class=\"item\">Gold panning kit</li>\
  <li class=\"item\">Silver spoon</li>\
  <li class=\"item\">Golden <b>retriever</b></li>\
  <li class=\"item\">Copper kettle</li>\
</ul>";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config_path, page_path) = parse_args()?;

    let options = if let Some(path) = config_path {
        let loader = ConfigLoader::load(Some(path)).unwrap_or_else(|e| {
            warn!("Failed to load config: {}, using defaults", e);
            ConfigLoader::new()
        });
        let mut options = loader.into_options();
        if options.input.is_none() {
            options.input = Some("#search".to_string());
        }
        options
    } else {
        FilterOptions::new("#search", ".item")
    };

    let page = match &page_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_PAGE.to_string(),
    };

    let candidate_selector = Selector::parse(&options.selector)?;
    let input_selector = options
        .input
        .as_deref()
        .map(Selector::parse)
        .transpose()?;

    let mut doc = MemoryDocument::parse(&page);
    let root = doc.root();
    let input = input_selector.and_then(|sel| doc.find(&sel));
    let controller = SearchController::bind(&mut doc, root, options);

    let Some(input) = input else {
        warn!("No input field in the page, nothing to do");
        return Ok(());
    };
    if !controller.is_active() {
        warn!("Filter did not bind, nothing to do");
        return Ok(());
    }

    info!("Type a query per line (Ctrl-D to quit)");
    render(&doc, root, &candidate_selector);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let query = line?;
        doc.set_input_value(input, query.trim_end());
        controller.on_key_event(&mut doc);
        // In a UI host the render loop would complete fades over time;
        // here each keystroke settles instantly.
        doc.settle();
        render(&doc, root, &candidate_selector);
    }

    Ok(())
}

/// Accepts `[--config <path>] [page.html]`.
fn parse_args() -> Result<(Option<PathBuf>, Option<PathBuf>)> {
    let mut config_path = None;
    let mut page_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(PathBuf::from(value));
            }
            _ => page_path = Some(PathBuf::from(arg)),
        }
    }

    Ok((config_path, page_path))
}

fn render(doc: &MemoryDocument, container: goldpan::NodeId, selector: &Selector) {
    for node in doc.query(container, selector) {
        let state = if doc.visibility(node).is_showing() {
            "shown"
        } else {
            "hidden"
        };
        // Render markers as reverse video so matches stand out on a terminal
        let line = doc
            .markup(node)
            .replace("<mark>", "\x1b[7m")
            .replace("</mark>", "\x1b[0m");
        println!("  [{state:>6}] {line}");
    }
    println!();
}
