use crate::api::client::PoetryClient;
use crate::cli::main_types::{ConfigCommands, SearchArgs};
use crate::core::actions::{Action, perform};
use crate::core::format::{IndexKind, ResultView};
use crate::core::query::{SearchCriteria, SearchField};
use crate::core::session::{ActionTracker, SearchForm};
use crate::display::{OutputFormat, ProgressSpinner, render};
use crate::error::{AppError, CliError};
use crate::storage::config::Config;
use crate::utils::error_helpers::convert_io_to_display_error;
use crate::utils::logging::{log_error, print_verbose};
use crate::utils::text::pad_to_width;
use crate::utils::validation::{validate_timeout, validate_url};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinSet};

/// Criteria from search flags. `--sample` fills the form first; explicit flags win.
pub fn criteria_from_args(args: &SearchArgs) -> SearchCriteria {
    let mut form = if args.sample {
        SearchForm::sample()
    } else {
        SearchForm::new()
    };
    if let Some(author) = &args.author {
        form.author = author.clone();
    }
    if let Some(title) = &args.title {
        form.title = title.clone();
    }
    if let Some(lines) = &args.lines {
        form.lines = lines.clone();
    }

    let mut criteria = form.criteria();
    if let Some(linecount) = &args.linecount {
        criteria.set(SearchField::Linecount, linecount.as_str());
    }
    if let Some(poemcount) = &args.poemcount {
        criteria.set(SearchField::Poemcount, poemcount.as_str());
    }
    criteria
}

/// Runs search, authors, titles and random: one request, one render.
#[derive(Default)]
pub struct ActionHandler;

impl ActionHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        action: Action,
        client: &PoetryClient,
        format: OutputFormat,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(
            verbose,
            &format!("Running '{}' against {}", action.describe(), client.base_url),
        );

        let view = self.fetch(&action, client, verbose).await?;
        let rendered = render(&view, format)?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", rendered)
            .map_err(|e| convert_io_to_display_error(e, "write result"))?;
        Ok(())
    }

    async fn fetch(
        &self,
        action: &Action,
        client: &PoetryClient,
        verbose: bool,
    ) -> Result<ResultView, AppError> {
        let mut spinner = if verbose {
            ProgressSpinner::disabled(String::new())
        } else {
            ProgressSpinner::new("Fetching from PoetryDB...".to_string())
        };
        spinner.start();
        let result = perform(client, action).await;
        spinner.stop();
        result
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");
                match &config.base_url {
                    Some(url) => println!("Base URL: {}", url),
                    None => println!("Base URL: (not set)"),
                }
                println!("Effective Base URL: {}", config.get_base_url());
                println!("Timeout: {} seconds", config.get_timeout());
                println!("Format: {}", config.get_format());
                Ok(())
            }
            ConfigCommands::Set {
                base_url,
                timeout,
                format,
            } => {
                print_verbose(
                    verbose,
                    &format!(
                        "Attempting config set - base_url: {:?}, timeout: {:?}, format: {:?}",
                        base_url, timeout, format
                    ),
                );

                let mut updated_fields = Vec::new();

                if let Some(url) = base_url {
                    validate_url(&url)?;
                    updated_fields.push(format!("base URL to: {}", url));
                    config.base_url = Some(url);
                }
                if let Some(secs) = timeout {
                    validate_timeout(secs)?;
                    config.timeout_seconds = Some(secs);
                    updated_fields.push(format!("timeout to: {}s", secs));
                }
                if let Some(format) = format {
                    config.format = Some(format);
                    updated_fields.push(format!("format to: {}", format));
                }

                if updated_fields.is_empty() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "No values provided. Use --base-url, --timeout and/or --format".to_string(),
                    )));
                }

                config.save(config_path)?;
                println!("✅ Set {}", updated_fields.join(", "));
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}

/// One line of input in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Set(SearchField, String),
    Sample,
    Clear,
    Show,
    Search,
    Authors,
    Titles,
    Random(Option<u32>),
    Help,
    Quit,
}

impl InteractiveCommand {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CliError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "author" | "title" | "lines" => {
                let field = SearchField::from_str(word)
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
                InteractiveCommand::Set(field, rest.to_string())
            }
            "sample" => InteractiveCommand::Sample,
            "clear" => InteractiveCommand::Clear,
            "show" => InteractiveCommand::Show,
            "search" => InteractiveCommand::Search,
            "authors" => InteractiveCommand::Authors,
            "titles" => InteractiveCommand::Titles,
            "random" if rest.is_empty() => InteractiveCommand::Random(None),
            "random" => {
                let count = rest.parse::<u32>().map_err(|_| {
                    CliError::InvalidArguments(format!("'{}' is not a poem count", rest))
                })?;
                InteractiveCommand::Random(Some(count))
            }
            "help" | "?" => InteractiveCommand::Help,
            "quit" | "exit" => InteractiveCommand::Quit,
            other => {
                return Err(CliError::InvalidArguments(format!(
                    "unknown command '{}', type 'help'",
                    other
                )));
            }
        };

        Ok(Some(command))
    }
}

const INTERACTIVE_HELP: &str = "Commands:
  author <text>   set the author field (empty clears it)
  title <text>    set the title field
  lines <text>    set the lines field
  sample          fill the form with a sample search
  clear           clear the form
  show            show the form
  search          search with the form, then clear it
  authors         list all authors
  titles          list all titles
  random [n]      show a random poem (or n poems)
  quit            leave";

/// Line-oriented stand-in for the search form and its buttons. Every fetch
/// runs as its own task; only the newest action's result is shown.
pub struct InteractiveHandler {
    client: Arc<PoetryClient>,
    tracker: Arc<ActionTracker>,
    format: OutputFormat,
    verbose: bool,
}

impl InteractiveHandler {
    pub fn new(client: PoetryClient, format: OutputFormat, verbose: bool) -> Self {
        Self {
            client: Arc::new(client),
            tracker: Arc::new(ActionTracker::new()),
            format,
            verbose,
        }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        println!("{}", INTERACTIVE_HELP);

        let mut form = SearchForm::new();
        let mut tasks = JoinSet::new();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| CliError::Input(e.to_string()))?
        {
            Self::reap_finished(&mut tasks);

            let command = match InteractiveCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    log_error(&e.to_string());
                    continue;
                }
            };

            match command {
                InteractiveCommand::Set(field, value) => {
                    if let Err(e) = form.set(field, &value) {
                        log_error(&e.to_string());
                    }
                }
                InteractiveCommand::Sample => form.fill_sample(),
                InteractiveCommand::Clear => form.clear(),
                InteractiveCommand::Show => println!("{}", Self::describe_form(&form)),
                InteractiveCommand::Search => {
                    let criteria = form.criteria();
                    if let Err(e) = criteria.validate() {
                        log_error(&AppError::from(e).display_friendly());
                        continue;
                    }
                    form.clear();
                    self.spawn(
                        &mut tasks,
                        Action::Search {
                            criteria,
                            output: Vec::new(),
                        },
                    );
                }
                InteractiveCommand::Authors => {
                    self.spawn(&mut tasks, Action::Index(IndexKind::Authors))
                }
                InteractiveCommand::Titles => {
                    self.spawn(&mut tasks, Action::Index(IndexKind::Titles))
                }
                InteractiveCommand::Random(count) => {
                    self.spawn(&mut tasks, Action::Random(count))
                }
                InteractiveCommand::Help => println!("{}", INTERACTIVE_HELP),
                InteractiveCommand::Quit => break,
            }
        }

        while let Some(joined) = tasks.join_next().await {
            Self::report_join(joined);
        }
        Ok(())
    }

    /// Collect tasks that already finished. Returns how many were collected.
    pub fn reap_finished(tasks: &mut JoinSet<()>) -> usize {
        let mut reaped = 0;
        while let Some(joined) = tasks.try_join_next() {
            Self::report_join(joined);
            reaped += 1;
        }
        reaped
    }

    fn report_join(joined: Result<(), JoinError>) {
        if let Err(e) = joined {
            if e.is_panic() {
                log_error(&format!("request task panicked: {}", e));
            } else {
                tracing::debug!(error = %e, "request task cancelled");
            }
        }
    }

    fn spawn(&self, tasks: &mut JoinSet<()>, action: Action) {
        let ticket = self.tracker.issue();
        print_verbose(
            self.verbose,
            &format!("Issued request #{}: {}", ticket.id(), action.describe()),
        );

        let client = Arc::clone(&self.client);
        let tracker = Arc::clone(&self.tracker);
        let format = self.format;

        tasks.spawn(async move {
            let result = perform(client.as_ref(), &action).await;
            match tracker.commit(ticket, result) {
                Some(Ok(view)) => match render(&view, format) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(e) => log_error(&e.to_string()),
                },
                Some(Err(e)) => log_error(&e.display_friendly()),
                None => {}
            }
        });
    }

    pub fn describe_form(form: &SearchForm) -> String {
        [("author", &form.author), ("title", &form.title), ("lines", &form.lines)]
            .iter()
            .map(|(name, value)| format!("{}{}", pad_to_width(name, 8), value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_from_args() {
        let args = SearchArgs {
            author: Some("poe".to_string()),
            title: Some("raven".to_string()),
            ..Default::default()
        };
        let criteria = criteria_from_args(&args);
        assert_eq!(
            criteria.iter().collect::<Vec<_>>(),
            vec![(SearchField::Author, "poe"), (SearchField::Title, "raven")]
        );
    }

    #[test]
    fn test_criteria_from_sample_args_with_override() {
        let args = SearchArgs {
            sample: true,
            title: Some("".to_string()),
            poemcount: Some("2".to_string()),
            ..Default::default()
        };
        let criteria = criteria_from_args(&args);
        assert_eq!(
            criteria.iter().collect::<Vec<_>>(),
            vec![
                (SearchField::Author, "shakespeare"),
                (SearchField::Lines, "turn'd"),
                (SearchField::Poemcount, "2"),
            ]
        );
    }

    #[test]
    fn test_empty_args_give_empty_criteria() {
        assert!(criteria_from_args(&SearchArgs::default()).is_empty());
    }

    #[test]
    fn test_parse_interactive_commands() {
        assert_eq!(InteractiveCommand::parse("   "), Ok(None));
        assert_eq!(
            InteractiveCommand::parse("author Edgar Allan Poe"),
            Ok(Some(InteractiveCommand::Set(
                SearchField::Author,
                "Edgar Allan Poe".to_string()
            )))
        );
        assert_eq!(
            InteractiveCommand::parse("title"),
            Ok(Some(InteractiveCommand::Set(SearchField::Title, String::new())))
        );
        assert_eq!(
            InteractiveCommand::parse("random 3"),
            Ok(Some(InteractiveCommand::Random(Some(3))))
        );
        assert_eq!(
            InteractiveCommand::parse("SEARCH"),
            Ok(Some(InteractiveCommand::Search))
        );
        assert_eq!(InteractiveCommand::parse("exit"), Ok(Some(InteractiveCommand::Quit)));
        assert!(InteractiveCommand::parse("random many").is_err());
        assert!(InteractiveCommand::parse("linecount 14").is_err());
    }

    #[test]
    fn test_describe_form() {
        let text = InteractiveHandler::describe_form(&SearchForm::sample());
        assert_eq!(
            text,
            "author  shakespeare\ntitle   Sonnet\nlines   turn'd"
        );
    }

    #[tokio::test]
    async fn test_reap_finished_collects_done_and_panicked_tasks() {
        let mut tasks = JoinSet::new();
        assert_eq!(InteractiveHandler::reap_finished(&mut tasks), 0);

        tasks.spawn(async {});
        tasks.spawn(async { panic!("render failed") });
        tasks.spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert_eq!(InteractiveHandler::reap_finished(&mut tasks), 2);
        assert_eq!(tasks.len(), 1);
        tasks.abort_all();
    }

    #[tokio::test]
    async fn test_config_set_requires_a_value() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = Config::default();
        let result = ConfigHandler::new()
            .handle(
                ConfigCommands::Set {
                    base_url: None,
                    timeout: None,
                    format: None,
                },
                &mut config,
                Some(temp_dir.path().join("config.toml")),
                false,
            )
            .await;
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::InvalidArguments(_)))
        ));
    }

    #[tokio::test]
    async fn test_config_set_saves_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        let mut config = Config::default();

        ConfigHandler::new()
            .handle(
                ConfigCommands::Set {
                    base_url: Some("http://localhost:3000".to_string()),
                    timeout: Some(5),
                    format: Some(OutputFormat::Json),
                },
                &mut config,
                Some(config_path.clone()),
                false,
            )
            .await
            .expect("config set should succeed");

        let loaded = Config::load(Some(config_path)).expect("load saved config");
        assert_eq!(loaded.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(loaded.timeout_seconds, Some(5));
        assert_eq!(loaded.format, Some(OutputFormat::Json));
    }

    #[tokio::test]
    async fn test_config_set_rejects_bad_url() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = Config::default();
        let result = ConfigHandler::new()
            .handle(
                ConfigCommands::Set {
                    base_url: Some("poetrydb.org".to_string()),
                    timeout: None,
                    format: None,
                },
                &mut config,
                Some(temp_dir.path().join("config.toml")),
                false,
            )
            .await;
        assert!(result.is_err());
        assert!(config.base_url.is_none());
    }
}
