use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use docref::api::{CmdMessage, DocrefApi, MessageLevel};
use docref::config::DocrefConfig;
use docref::error::Result;
use docref::model::Record;
use docref::store::fs::FileStore;
use docref::vfs::SchemeRegistry;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: DocrefApi<FileStore>,
    config: DocrefConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create { file }) => handle_create(&mut ctx, file),
        Some(Commands::List { deleted }) => handle_list(&ctx, deleted),
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::Cat { id, pointer }) => handle_cat(&ctx, id, pointer),
        Some(Commands::Cp {
            id,
            destination,
            pointer,
        }) => handle_cp(&ctx, id, destination, pointer),
        Some(Commands::Mv {
            id,
            destination,
            pointer,
        }) => handle_mv(&mut ctx, id, destination, pointer),
        Some(Commands::Rm { id, pointer, force }) => handle_rm(&mut ctx, id, pointer, force),
        Some(Commands::Setcontents {
            id,
            source,
            pointer,
        }) => handle_setcontents(&ctx, id, source, pointer),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&ctx, false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = cwd.join(".docref");

    let store_dir = if cli.global {
        let proj_dirs =
            ProjectDirs::from("com", "docref", "docref").expect("Could not determine data dir");
        proj_dirs.data_dir().to_path_buf()
    } else {
        project_dir
    };

    let config = DocrefConfig::load(&store_dir).unwrap_or_default();

    let mut registry = SchemeRegistry::with_defaults();
    registry.set_default_scheme(&config.default_scheme);

    let store = FileStore::new(store_dir.clone());
    let api = DocrefApi::new(store, store_dir).with_registry(registry);

    Ok(AppContext { api, config })
}

fn handle_create(ctx: &mut AppContext, file: Option<PathBuf>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let data: serde_json::Value = serde_json::from_str(&text)?;

    let result = ctx.api.create_record(data)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, deleted: bool) -> Result<()> {
    let result = ctx.api.list_records(deleted)?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: String) -> Result<()> {
    let result = ctx.api.show_record(&id)?;
    for record in &result.listed_records {
        let rendered = if ctx.config.pretty_json {
            serde_json::to_string_pretty(&record.data)?
        } else {
            serde_json::to_string(&record.data)?
        };
        println!("{}", rendered);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: String) -> Result<()> {
    let result = ctx.api.delete_record(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_cat(ctx: &AppContext, id: String, pointer: String) -> Result<()> {
    let result = ctx.api.cat_document(&id, &pointer)?;
    if let Some(content) = &result.content {
        io::stdout().write_all(content)?;
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_cp(ctx: &AppContext, id: String, destination: String, pointer: String) -> Result<()> {
    let result = ctx.api.copy_document(&id, &pointer, &destination)?;
    let rendered = if ctx.config.pretty_json {
        serde_json::to_string_pretty(&result.patch)?
    } else {
        serde_json::to_string(&result.patch)?
    };
    println!("{}", rendered);
    print_messages(&result.messages);
    Ok(())
}

fn handle_mv(ctx: &mut AppContext, id: String, destination: String, pointer: String) -> Result<()> {
    let result = ctx.api.move_document(&id, &pointer, &destination)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, id: String, pointer: String, force: bool) -> Result<()> {
    let result = ctx.api.remove_document(&id, &pointer, force)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_setcontents(
    ctx: &AppContext,
    id: String,
    source: Option<PathBuf>,
    pointer: String,
) -> Result<()> {
    let result = match source {
        Some(path) => {
            let mut file = std::fs::File::open(path)?;
            ctx.api.set_contents(&id, &pointer, &mut file)?
        }
        None => {
            let stdin = io::stdin();
            let mut lock = stdin.lock();
            ctx.api.set_contents(&id, &pointer, &mut lock)?
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    for record in records {
        let id_str = record.meta.id.to_string();
        let idx_str = format!("{}. ", &id_str[..8]);
        let title = record.title().unwrap_or("(untitled)");

        // Most records keep their reference at the conventional pointer;
        // showing it here is a preview, not a contract.
        let uri = record
            .data
            .pointer("/document/uri")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let title_content = if uri.is_empty() {
            title.to_string()
        } else {
            format!("{} {}", title, uri)
        };

        let idx_width = idx_str.width();
        let fixed_width = 4 + idx_width + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        let idx_colored = if record.meta.is_deleted {
            idx_str.red()
        } else {
            idx_str.yellow()
        };
        let time_colored = format_time_ago(record.meta.created_at).dimmed();

        println!(
            "    {}{}{}  {}",
            idx_colored,
            title_display,
            " ".repeat(padding),
            time_colored
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            out.push('…');
            break;
        }
        out.push(c);
        used += w;
    }
    out
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
