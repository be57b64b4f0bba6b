use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use textpage_config::Config;
use textpage_engine::export::{
    Viewport, download_file_name, page_json, prototype_document, standalone_document,
};
use textpage_engine::{
    BlogRepository, FileStore, GeneratedPage, GenerationMode, Generator, LocalGenerator,
    PageFilter, PageHistory, RemoteGenerator, RemoteSettings, SortBy, SortOrder, validate,
};

#[derive(Args)]
pub struct ConvertArgs {
    /// Input file; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Generator to use (local or remote); default from config
    #[arg(long)]
    pub mode: Option<GenerationMode>,

    /// Title for the saved page instead of the derived one
    #[arg(long)]
    pub title: Option<String>,

    /// Save the result to history
    #[arg(long)]
    pub save: bool,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Wrap the HTML in a complete standalone document
    #[arg(long, conflicts_with = "prototype")]
    pub standalone: bool,

    /// Wrap the HTML in a UI prototype page
    #[arg(long)]
    pub prototype: bool,

    /// Prototype frame width: desktop, tablet or mobile
    #[arg(long)]
    pub viewport: Option<Viewport>,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List saved pages
    List {
        /// Case-insensitive search in title, text and tags
        #[arg(long)]
        search: Option<String>,
        /// Only pages from this generator
        #[arg(long)]
        mode: Option<GenerationMode>,
        /// created, updated, title or size
        #[arg(long, default_value = "created")]
        sort: SortBy,
        /// Ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Print one page's details and HTML
    Show { id: String },
    /// Export one page as JSON or a standalone HTML document
    Export {
        id: String,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file, or a directory to get a generated file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export every page as a JSON array
    ExportAll {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete pages by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Totals across all pages
    Stats,
    /// Delete every saved page
    Clear {
        /// Required; clearing cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Html,
}

#[derive(Subcommand)]
pub enum BlogCommand {
    /// Convert a file and publish it as a blog post
    Publish {
        file: PathBuf,
        /// Author name (default from config)
        #[arg(long)]
        author: Option<String>,
    },
    /// List posts, newest first
    List,
    /// Search posts
    Search { query: String },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print where the config file lives
    Path,
}

#[derive(Subcommand)]
pub enum RemoteCommand {
    /// Check the API key against the remote endpoint
    Check,
}

fn store(config: &Config) -> FileStore {
    FileStore::new(&config.data_dir)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn remote_settings(config: &Config) -> RemoteSettings {
    RemoteSettings {
        base_url: config.remote.base_url.clone(),
        model: config.remote.model.clone(),
        api_key: config.api_key(),
        timeout: Duration::from_secs(config.remote.timeout_secs),
    }
}

fn generator_for(config: &Config, mode: GenerationMode) -> Result<Box<dyn Generator>> {
    Ok(match mode {
        GenerationMode::Local => Box::new(LocalGenerator::new()),
        GenerationMode::Remote => Box::new(RemoteGenerator::new(remote_settings(config))?),
    })
}

pub fn convert(config: &Config, args: ConvertArgs) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    validate(&text)?;

    let mode = match args.mode {
        Some(mode) => mode,
        None => config
            .default_mode
            .parse()
            .context("Invalid default_mode in config")?,
    };
    let generator = generator_for(config, mode)?;
    let parsed = generator.generate(&text)?;

    let page = if args.save {
        let mut history = PageHistory::new(store(config));
        let page = history.insert(&parsed, &text, mode, args.title.as_deref())?;
        eprintln!("Saved page {}", page.id);
        page
    } else {
        let title = args.title.clone().unwrap_or_else(|| parsed.title.clone());
        GeneratedPage::new(&parsed, &text, mode, title, Utc::now())
    };

    let html = if args.standalone {
        standalone_document(&page, Local::now())
    } else if args.prototype {
        prototype_document(&parsed, args.viewport.unwrap_or_default())
    } else {
        parsed.rendered_html.clone()
    };
    write_output(args.output.as_deref(), &html)
}

pub fn history(config: &Config, command: HistoryCommand) -> Result<()> {
    let mut history = PageHistory::new(store(config));

    match command {
        HistoryCommand::List {
            search,
            mode,
            sort,
            asc,
        } => {
            let pages = history.filter(&PageFilter {
                search,
                mode,
                sort_by: sort,
                order: if asc {
                    SortOrder::Ascending
                } else {
                    SortOrder::Descending
                },
            })?;
            if pages.is_empty() {
                println!("No pages found");
            }
            for page in pages {
                println!("{}", summary_line(&page));
            }
        }
        HistoryCommand::Show { id } => {
            let page = find_page(&history, &id)?;
            println!("{}", summary_line(&page));
            println!("Tags: {}", tag_list(&page));
            println!("Updated: {}", page.updated_at.with_timezone(&Local));
            println!();
            println!("{}", page.html_content);
        }
        HistoryCommand::Export { id, format, output } => {
            let page = find_page(&history, &id)?;
            let (content, ext) = match format {
                ExportFormat::Json => (page_json(&page)?, "json"),
                ExportFormat::Html => (standalone_document(&page, Local::now()), "html"),
            };
            let target = output.map(|path| {
                if path.is_dir() {
                    path.join(download_file_name(&page.title, &Local::now(), ext))
                } else {
                    path
                }
            });
            write_output(target.as_deref(), &content)?;
        }
        HistoryCommand::ExportAll { output } => {
            write_output(output.as_deref(), &history.export_all()?)?;
        }
        HistoryCommand::Delete { ids } => {
            let removed = history.delete_many(&ids)?;
            println!("Deleted {removed} of {} page(s)", ids.len());
        }
        HistoryCommand::Stats => {
            let stats = history.stats()?;
            println!("Pages:       {}", stats.total_pages);
            println!("Characters:  {}", stats.total_characters);
            println!("Local:       {}", stats.local_count);
            println!("Remote:      {}", stats.remote_count);
        }
        HistoryCommand::Clear { yes } => {
            if !yes {
                bail!("Refusing to clear history without --yes");
            }
            history.clear()?;
            println!("History cleared");
        }
    }
    Ok(())
}

pub fn blog(config: &Config, command: BlogCommand) -> Result<()> {
    let mut blog = BlogRepository::new(store(config));

    match command {
        BlogCommand::Publish { file, author } => {
            let text = read_input(Some(&file))?;
            validate(&text)?;
            let parsed = LocalGenerator::new().generate(&text)?;
            let author = author.unwrap_or_else(|| config.author.clone());
            let post = blog.create_post(&parsed, &author, Local::now().date_naive());
            let post = blog.publish(post)?;
            println!("Published {} ({})", post.title, post.id);
        }
        BlogCommand::List => {
            for post in blog.recent(usize::MAX)? {
                println!(
                    "{}  {}  {}  [{}]",
                    post.published_at,
                    post.id,
                    post.title,
                    post.tags.join(", ")
                );
            }
        }
        BlogCommand::Search { query } => {
            for post in blog.search(&query)? {
                println!("{}  {}  {}", post.published_at, post.id, post.title);
            }
        }
    }
    Ok(())
}

pub fn config(command: ConfigCommand) -> Result<()> {
    let path = Config::config_path();
    match command {
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {}; use --force to overwrite",
            path.display()
        );
    }
    Config::expanded_default().save_to_path(path)?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

pub fn remote(config: &Config, command: RemoteCommand) -> Result<()> {
    match command {
        RemoteCommand::Check => {
            let generator = RemoteGenerator::new(remote_settings(config))?;
            generator.check_api_key()?;
            println!("API key accepted by {}", config.remote.base_url);
        }
    }
    Ok(())
}

fn find_page(history: &PageHistory<FileStore>, id: &str) -> Result<GeneratedPage> {
    history
        .get_by_id(id)?
        .with_context(|| format!("No page with id {id}"))
}

fn tag_list(page: &GeneratedPage) -> String {
    page.tags
        .iter()
        .map(|tag| tag.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn summary_line(page: &GeneratedPage) -> String {
    format!(
        "{}  {}  {:<6}  {:>6} chars  {}",
        page.id,
        page.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        page.generation_mode.to_string(),
        page.character_count,
        page.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> Config {
        Config {
            data_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    fn convert_args(file: PathBuf, output: PathBuf) -> ConvertArgs {
        ConvertArgs {
            file: Some(file),
            mode: Some(GenerationMode::Local),
            title: None,
            save: true,
            output: Some(output),
            standalone: false,
            prototype: false,
            viewport: None,
        }
    }

    #[test]
    fn convert_writes_html_and_saves_history() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("note.txt");
        let output = temp_dir.path().join("out").join("note.html");
        std::fs::write(&input, "# Note\n- a\n- b").unwrap();
        let config = config_in(&temp_dir.path().join("data"));

        convert(&config, convert_args(input, output.clone())).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "<h1>Note</h1>\n<ul><li>a</li><li>b</li></ul>\n"
        );
        let pages = PageHistory::new(store(&config)).list().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Note");
    }

    #[test]
    fn convert_rejects_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("blank.txt");
        std::fs::write(&input, "  \n").unwrap();
        let config = config_in(temp_dir.path());

        let err = convert(&config, convert_args(input, temp_dir.path().join("x.html")))
            .unwrap_err();
        assert_eq!(err.to_string(), "Input text is empty");
    }

    #[test]
    fn remote_without_key_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("note.txt");
        std::fs::write(&input, "hello").unwrap();
        let mut config = config_in(temp_dir.path());
        config.remote.api_key_env = "TEXTPAGE_CLI_TEST_UNSET_KEY".to_string();

        let mut args = convert_args(input, temp_dir.path().join("x.html"));
        args.mode = Some(GenerationMode::Remote);
        let err = convert(&config, args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No API key configured for the remote generator"
        );
    }

    #[test]
    fn config_init_writes_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("textpage").join("config.toml");

        init_config(&path, false).unwrap();
        let written = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(written, Config::expanded_default());

        std::fs::write(&path, "author = \"Kept\"\n").unwrap();
        let err = init_config(&path, false).unwrap_err();
        assert!(err.to_string().starts_with("Config already exists"));
        assert_eq!(
            Config::load_from_path(&path).unwrap().unwrap().author,
            "Kept"
        );

        init_config(&path, true).unwrap();
        assert_eq!(
            Config::load_from_path(&path).unwrap().unwrap().author,
            "Editor"
        );
    }

    #[test]
    fn remote_check_without_key_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(temp_dir.path());
        config.remote.api_key_env = "TEXTPAGE_CLI_TEST_UNSET_CHECK_KEY".to_string();

        let err = remote(&config, RemoteCommand::Check).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No API key configured for the remote generator"
        );
    }

    #[test]
    fn clear_needs_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        assert!(history(&config, HistoryCommand::Clear { yes: false }).is_err());
        assert!(history(&config, HistoryCommand::Clear { yes: true }).is_ok());
    }

    #[test]
    fn export_to_directory_uses_generated_name() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir.path().join("data"));
        let input = temp_dir.path().join("note.txt");
        std::fs::write(&input, "# Export me\nbody").unwrap();
        convert(&config, convert_args(input, temp_dir.path().join("n.html"))).unwrap();

        let id = PageHistory::new(store(&config)).list().unwrap()[0].id.clone();
        let out_dir = temp_dir.path().join("exports");
        std::fs::create_dir_all(&out_dir).unwrap();
        history(
            &config,
            HistoryCommand::Export {
                id,
                format: ExportFormat::Html,
                output: Some(out_dir.clone()),
            },
        )
        .unwrap();

        let names: Vec<String> = std::fs::read_dir(&out_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("Export_me_"));
        assert!(names[0].ends_with(".html"));
    }
}
