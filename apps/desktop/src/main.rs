use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings, ConsoleState, HttpUserDirectory, SubmitOutcome, UserFormController,
};
use shared::{
    domain::{avatar_url, AvatarStyle, FormDraft, UserId, UserRecord},
    error::InvalidDraft,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "user-console", about = "Manage users stored in a remote users collection")]
struct Cli {
    /// API root; `/users` is appended. Overrides configuration.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Settings file (defaults to ./console.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every user.
    List,
    /// Create a user from the given fields.
    Create(DraftArgs),
    /// Edit an existing user; fields that are not given keep their stored value.
    Update {
        id: i64,
        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Delete a user by id.
    Delete { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AvatarArg {
    Boy,
    Girl,
}

impl From<AvatarArg> for AvatarStyle {
    fn from(value: AvatarArg) -> Self {
        match value {
            AvatarArg::Boy => AvatarStyle::Boy,
            AvatarArg::Girl => AvatarStyle::Girl,
        }
    }
}

#[derive(clap::Args, Debug, Default)]
struct DraftArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    password: Option<String>,
    /// Calendar date, e.g. 2000-01-31.
    #[arg(long)]
    birthday: Option<String>,
    #[arg(long)]
    img_url: Option<String>,
    /// Fill the image URL with a generated placeholder avatar.
    #[arg(long, value_enum, conflicts_with = "img_url")]
    avatar: Option<AvatarArg>,
}

impl DraftArgs {
    fn apply(self, draft: &mut FormDraft, stamp_millis: i64) {
        let fields = [
            (self.first_name, &mut draft.first_name),
            (self.last_name, &mut draft.last_name),
            (self.email, &mut draft.email),
            (self.password, &mut draft.password),
            (self.birthday, &mut draft.birthday),
            (self.img_url, &mut draft.img_url),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(style) = self.avatar {
            draft.img_url = avatar_url(style.into(), stamp_millis);
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail_on_banner(state: &ConsoleState) -> Result<()> {
    match state.error_message() {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

fn render_user(user: &UserRecord) -> String {
    let mut line = format!(
        "#{:<5} {}  <{}>  Birthday: {}",
        user.id.0,
        user.full_name(),
        user.email,
        user.birthday
    );
    if let Some(avatar) = user.avatar() {
        line.push_str(&format!("  [{avatar}]"));
    }
    line
}

fn print_users(state: &ConsoleState) {
    if state.show_empty_placeholder() {
        println!("No users found");
        return;
    }
    for user in &state.users {
        println!("{}", render_user(user));
    }
}

fn report_submit(controller: &UserFormController, outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {message}", field.label());
            }
            Err(InvalidDraft(errors).into())
        }
        SubmitOutcome::Failed => fail_on_banner(controller.state()),
        SubmitOutcome::Saved(record) => {
            match record {
                Some(record) => println!("Saved user {} ({})", record.id, record.full_name()),
                None => println!("Saved user"),
            }
            fail_on_banner(controller.state())?;
            print_users(controller.state());
            Ok(())
        }
    }
}

async fn run(command: Command, controller: &mut UserFormController) -> Result<()> {
    let stamp = chrono::Utc::now().timestamp_millis();
    match command {
        Command::List => {
            controller.list().await;
            fail_on_banner(controller.state())?;
            print_users(controller.state());
        }
        Command::Create(fields) => {
            let mut draft = FormDraft::default();
            fields.apply(&mut draft, stamp);
            let outcome = controller.submit(draft).await;
            report_submit(controller, outcome)?;
        }
        Command::Update { id, fields } => {
            controller.list().await;
            fail_on_banner(controller.state())?;
            let record = controller
                .state()
                .users
                .iter()
                .find(|user| user.id == UserId(id))
                .cloned()
                .with_context(|| format!("no user with id {id}"))?;

            controller.begin_edit(&record);
            let mut draft = controller.state().draft.clone();
            fields.apply(&mut draft, stamp);
            let outcome = controller.submit(draft).await;
            report_submit(controller, outcome)?;
        }
        Command::Delete { id } => {
            if controller.delete(UserId(id)).await {
                println!("Deleted user {id}");
            }
            fail_on_banner(controller.state())?;
            print_users(controller.state());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    init_tracing(&settings.log_filter);

    let directory = HttpUserDirectory::from_settings(&settings)
        .with_context(|| format!("cannot use API root '{}'", settings.api_url))?;
    tracing::debug!(users_url = directory.users_url(), "resolved users endpoint");

    let mut controller = UserFormController::new(Arc::new(directory));
    run(cli.command, &mut controller).await
}
