//! Command-line front end for ValueLog.
//!
//! # Responsibility
//! - Map subcommands onto profile session use-cases.
//! - Resolve configuration from the environment and optional flags.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use valuelog_core::db::open_db;
use valuelog_core::{
    init_logging, CoreConfig, EntryDraft, GeminiClient, Language, NarrativeAssist, ProfileStore,
    Session, SqliteKvStore, Starr, TagCategory,
};

#[derive(Parser)]
#[command(name = "valuelog")]
#[command(about = "Record children's experiences and review their growth")]
#[command(version)]
struct Cli {
    /// Database file (overrides VALUELOG_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the profile with this name, creating it when new
    SignIn { name: String },
    /// List local profiles
    Profiles,
    /// Open a local profile by id
    Open { user_id: String },
    /// Show or change the display language (en, ko, ja, es)
    Language { code: Option<String> },
    /// Turn raw notes into a STARR narrative with suggested tags
    Assist { notes: String },
    #[command(flatten)]
    Session(SessionCommand),
}

/// Subcommands that act on the active profile.
#[derive(Subcommand)]
enum SessionCommand {
    /// Forget the active profile
    SignOut,
    /// Show the active profile
    Whoami,
    /// List children
    Children,
    /// Add a child and select it
    AddChild { name: String },
    /// Select a child by id
    Select { child_id: String },
    /// List entries of the selected child, newest first
    Timeline,
    /// Record an entry for the selected child
    AddEntry(AddEntryArgs),
    /// Delete an entry by id
    DeleteEntry { entry_id: String },
    /// Show statistics of the selected child
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the tag vocabulary of one axis
    Tags { category: CategoryArg },
    /// Add a custom tag
    AddTag { category: CategoryArg, tag: String },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::SignIn { .. } => "sign_in",
            Self::Profiles => "profiles",
            Self::Open { .. } => "open",
            Self::Language { .. } => "language",
            Self::Assist { .. } => "assist",
            Self::Session(command) => command.name(),
        }
    }
}

impl SessionCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::SignOut => "sign_out",
            Self::Whoami => "whoami",
            Self::Children => "children",
            Self::AddChild { .. } => "add_child",
            Self::Select { .. } => "select",
            Self::Timeline => "timeline",
            Self::AddEntry(_) => "add_entry",
            Self::DeleteEntry { .. } => "delete_entry",
            Self::Dashboard { .. } => "dashboard",
            Self::Tags { .. } => "tags",
            Self::AddTag { .. } => "add_tag",
        }
    }
}

#[derive(clap::Args)]
struct AddEntryArgs {
    #[arg(long)]
    title: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// 1 to 5
    #[arg(long, default_value_t = 5)]
    satisfaction: u8,
    #[arg(long = "activity")]
    activity_tags: Vec<String>,
    #[arg(long = "competency")]
    competency_tags: Vec<String>,
    #[arg(long, default_value = "")]
    situation: String,
    #[arg(long, default_value = "")]
    task: String,
    #[arg(long, default_value = "")]
    action: String,
    #[arg(long, default_value = "")]
    result: String,
    #[arg(long, default_value = "")]
    reflection: String,
    /// Encoded image payload, e.g. a data URL
    #[arg(long)]
    image: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Activity,
    Competency,
}

impl From<CategoryArg> for TagCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Activity => TagCategory::Activity,
            CategoryArg::Competency => TagCategory::Competency,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CoreConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("Failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn)?);
    log::info!("event=cli_start module=cli status=ok command={}", cli.command.name());

    match cli.command {
        Command::SignIn { name } => {
            let session = Session::sign_in(store, &name)?;
            println!("Signed in as {} ({})", session.user().name, session.user().id);
        }
        Command::Profiles => {
            let active = store.get_active_user().map(|user| user.id);
            for user in store.get_users() {
                let marker = if active.as_deref() == Some(user.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {}  {}", user.id, user.name);
            }
        }
        Command::Open { user_id } => {
            let session = Session::open_by_id(store, &user_id)?;
            println!("Opened {} ({})", session.user().name, session.user().id);
        }
        Command::Language { code } => {
            let Some(code) = code else {
                println!("{}", store.get_language().code());
                return Ok(());
            };
            let Some(language) = Language::from_code(code.trim()) else {
                bail!("unsupported language `{code}`; expected en, ko, ja or es");
            };
            store.set_language(language)?;
            println!("Language set to {}", language.code());
        }
        Command::Assist { notes } => {
            let language = store.get_language();
            run_assist(&config, &notes, language).await?;
        }
        Command::Session(command) => {
            let session = match Session::resume(store) {
                Ok(session) => session,
                Err(_) => bail!("no active profile; run `valuelog sign-in <name>` first"),
            };
            run_session_command(session, command)?;
        }
    }

    Ok(())
}

fn run_session_command(
    mut session: Session<SqliteKvStore<'_>>,
    command: SessionCommand,
) -> Result<()> {
    match command {
        SessionCommand::SignOut => {
            session.sign_out()?;
            println!("Signed out");
        }
        SessionCommand::Whoami => {
            println!("{} ({})", session.user().name, session.user().id);
        }
        SessionCommand::Children => {
            let selected = session.selected_child().map(|child| child.id.clone());
            for child in session.children() {
                let marker = if selected.as_deref() == Some(child.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {}  {}", child.id, child.name);
            }
        }
        SessionCommand::AddChild { name } => {
            let child = session.add_child(&name)?;
            println!("Added {} ({})", child.name, child.id);
        }
        SessionCommand::Select { child_id } => {
            let child = session.select_child(&child_id)?;
            println!("Selected {}", child.name);
        }
        SessionCommand::Timeline => {
            let table = session.locale_table();
            for entry in session.timeline() {
                let tags: Vec<&str> = entry
                    .activity_tags
                    .iter()
                    .chain(&entry.competency_tags)
                    .map(|tag| table.label(tag))
                    .collect();
                println!(
                    "{}  {}  [{}]  {}/5  {}",
                    entry.date,
                    entry.title,
                    tags.join(", "),
                    entry.satisfaction,
                    entry.id
                );
            }
        }
        SessionCommand::AddEntry(args) => {
            let entry = session.create_entry(draft_from(args))?;
            println!("Saved {} ({})", entry.title, entry.id);
        }
        SessionCommand::DeleteEntry { entry_id } => {
            session.delete_entry(&entry_id)?;
            println!("Deleted {entry_id}");
        }
        SessionCommand::Dashboard { json } => {
            let stats = session.dashboard();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Entries: {}", stats.total_entries);
            println!("Average satisfaction: {:.1}", stats.avg_satisfaction);
            println!("Activities:");
            for bucket in &stats.activity_distribution {
                println!("  {:<20} {}", bucket.name, bucket.value);
            }
            println!("Competencies:");
            for bucket in &stats.competency_distribution {
                println!("  {:<20} {}", bucket.name, bucket.value);
            }
        }
        SessionCommand::Tags { category } => {
            for tag in session.all_tags(category.into()) {
                println!("{:<20} {}", tag, session.tag_label(&tag));
            }
        }
        SessionCommand::AddTag { category, tag } => {
            let outcome = session.add_custom_tag(category.into(), &tag)?;
            match outcome.tag {
                Some(tag) => println!("Added {tag}"),
                None => println!("Tag is empty or already present"),
            }
        }
    }
    Ok(())
}

fn draft_from(args: AddEntryArgs) -> EntryDraft {
    let mut draft = EntryDraft::new(args.title, args.date);
    draft.satisfaction = args.satisfaction;
    draft.activity_tags = args.activity_tags;
    draft.competency_tags = args.competency_tags;
    draft.starr = Starr {
        situation: args.situation,
        task: args.task,
        action: args.action,
        result: args.result,
        reflection: args.reflection,
    };
    draft.image = args.image;
    draft
}

async fn run_assist(config: &CoreConfig, notes: &str, language: Language) -> Result<()> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        bail!("GEMINI_API_KEY is not set");
    };
    let client = GeminiClient::new(api_key)?
        .with_model(config.gemini_model.clone())
        .with_base_url(config.gemini_base_url.clone());
    let assist = NarrativeAssist::new(client);

    let Some(draft) = assist.assist_notes(notes, language).await else {
        bail!("notes are empty");
    };
    if draft.starr.is_blank() {
        eprintln!("The assistant returned nothing; try again or write the narrative yourself.");
    }
    println!("Situation:  {}", draft.starr.situation);
    println!("Task:       {}", draft.starr.task);
    println!("Action:     {}", draft.starr.action);
    println!("Result:     {}", draft.starr.result);
    println!("Reflection: {}", draft.starr.reflection);
    println!("Activities:   {}", draft.suggestions.activity_tags.join(", "));
    println!("Competencies: {}", draft.suggestions.competency_tags.join(", "));
    Ok(())
}
