use crate::api::client::PoetryClient;
use crate::cli::command_handlers::{
    ActionHandler, ConfigHandler, InteractiveHandler, criteria_from_args,
};
use crate::cli::main_types::Commands;
use crate::core::actions::Action;
use crate::core::format::IndexKind;
use crate::display::OutputFormat;
use crate::error::AppError;
use crate::storage::config::Config;
use crate::utils::logging::print_verbose;
use crate::utils::validation::{validate_timeout, validate_url};
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
    base_url: Option<String>,
    format: Option<OutputFormat>,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
        base_url: Option<String>,
        format: Option<OutputFormat>,
    ) -> Self {
        Self {
            config,
            config_path,
            verbose,
            base_url,
            format,
        }
    }

    // CLI argument (or POETRYDB_URL through clap) > config file > default
    pub fn effective_base_url(&self) -> String {
        match &self.base_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => self.config.get_base_url(),
        }
    }

    pub fn effective_format(&self) -> OutputFormat {
        self.format.unwrap_or_else(|| self.config.get_format())
    }

    fn create_client(&self) -> Result<PoetryClient, AppError> {
        let url = self.effective_base_url();
        validate_url(&url)?;
        validate_timeout(self.config.get_timeout())?;
        self.log_verbose(&format!(
            "Creating client for {} (timeout {}s)",
            url,
            self.config.get_timeout()
        ));
        Ok(PoetryClient::with_timeout(url, self.config.get_timeout())?)
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        let action = match command {
            Commands::Config { command } => {
                let config_path = self.config_path.clone();
                return ConfigHandler::new()
                    .handle(command, &mut self.config, config_path, self.verbose)
                    .await;
            }
            Commands::Interactive => {
                let handler = InteractiveHandler::new(
                    self.create_client()?,
                    self.effective_format(),
                    self.verbose,
                );
                return handler.run().await;
            }
            Commands::Search(args) => Action::Search {
                criteria: criteria_from_args(&args),
                output: args.output,
            },
            Commands::Authors => Action::Index(IndexKind::Authors),
            Commands::Titles => Action::Index(IndexKind::Titles),
            Commands::Random { count } => Action::Random(count),
        };

        let client = self.create_client()?;
        ActionHandler::new()
            .handle(action, &client, self.effective_format(), self.verbose)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::main_types::SearchArgs;
    use crate::error::ValidationError;

    fn create_test_dispatcher(base_url: Option<&str>) -> Dispatcher {
        let config = Config {
            base_url: Some("http://config.test".to_string()),
            timeout_seconds: Some(5),
            format: Some(OutputFormat::Html),
        };
        Dispatcher::new(config, None, true, base_url.map(str::to_string), None)
    }

    #[test]
    fn test_cli_base_url_wins_over_config() {
        let d = create_test_dispatcher(Some("http://cli.test"));
        assert_eq!(d.effective_base_url(), "http://cli.test");
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let d = create_test_dispatcher(None);
        assert_eq!(d.effective_format(), OutputFormat::Html);

        let mut d = create_test_dispatcher(None);
        d.format = Some(OutputFormat::Json);
        assert_eq!(d.effective_format(), OutputFormat::Json);
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected() {
        let mut d = create_test_dispatcher(Some("not-a-url"));
        let result = d.dispatch(Commands::Authors).await;
        assert!(matches!(result, Err(AppError::Cli(_))));
    }

    #[tokio::test]
    async fn test_zero_timeout_from_config_is_rejected() {
        let mut d = create_test_dispatcher(Some("http://127.0.0.1:9"));
        d.config.timeout_seconds = Some(0);
        let result = d.dispatch(Commands::Random { count: None }).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_empty_search_fails_before_any_request() {
        // Unroutable address: reaching the network would surface a FetchError instead.
        let mut d = create_test_dispatcher(Some("http://127.0.0.1:9"));
        let result = d.dispatch(Commands::Search(SearchArgs::default())).await;
        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::MissingSearchParameter))
        ));
    }
}
