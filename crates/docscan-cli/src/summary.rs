use std::path::Path;

use console::Style;
use docscan_core::config::AppConfig;
use docscan_core::gallery::{GalleryState, MSG_GALLERY_EMPTY};
use docscan_core::identity::Identity;
use docscan_core::store::DocumentRecord;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_upload_summary(config: &AppConfig, file: &Path, identity: &Identity) {
    let s = Styles::new();
    print_title(&s, "DocScan Upload");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("User"),
        s.value.apply_to(identity.display_name())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Transform"),
        s.method.apply_to(config.transform)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Backend"),
        s.method.apply_to(&config.backend)
    );
    println!();
}

pub fn print_record(record: &DocumentRecord) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to("Stored"));
    println!("    {:<12}{}", s.label.apply_to("Id"), s.value.apply_to(&record.id));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Original"),
        s.path.apply_to(&record.original_file_url)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Processed"),
        s.path.apply_to(&record.processed_file_url)
    );
    println!();
}

pub fn print_gallery(state: &GalleryState, identity: Option<&Identity>, show_urls: bool) {
    let s = Styles::new();
    print_title(&s, "My Documents");

    let entries = match state {
        GalleryState::SignedOut => {
            println!(
                "  {}",
                s.disabled
                    .apply_to("Not signed in. Set [identity] in the config or pass --user.")
            );
            println!();
            return;
        }
        GalleryState::Empty => {
            println!("  {}", s.disabled.apply_to(MSG_GALLERY_EMPTY));
            println!();
            return;
        }
        GalleryState::Loaded(entries) => entries,
    };

    if let Some(identity) = identity {
        println!(
            "  {:<14}{}",
            s.label.apply_to("User"),
            s.value.apply_to(identity.display_name())
        );
        println!();
    }

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {:>3}. {}  {}",
            s.label.apply_to(i + 1),
            s.value.apply_to(entry.title()),
            s.label.apply_to(entry.display_date())
        );
        if show_urls {
            println!(
                "       {:<11}{}",
                s.label.apply_to("original"),
                s.path.apply_to(&entry.record.original_file_url)
            );
            println!(
                "       {:<11}{}",
                s.label.apply_to("processed"),
                s.path.apply_to(&entry.record.processed_file_url)
            );
        }
    }
    println!();
}
