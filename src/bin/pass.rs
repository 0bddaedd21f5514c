//! PASS CLI: read and edit the PASS collections in a Solid pod.
//!
//! Usage:
//!   pass contacts <list|add|delete> [--web-id id] [--pod-url url]
//!   pass users <list|add|delete>
//!   pass messages <list|send|read|delete>
//!   pass documents <list|add|delete|share>
//!   pass activity <update|show>
//!   pass state <get|set|remove|clear-session>

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use pass::config::PassConfig;
use pass::model::unread_count;
use pass::{
    AccessModes, CollectionCache, Contact, DocumentRecord, HttpPod, MailBox, Message, PassClient,
    SqliteState, StateKey, StateStore, User,
};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

type CmdResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "pass", version, about = "Personal Access System for Services pod client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to the YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// WebID to act as (overrides the config file)
    #[arg(long, global = true)]
    web_id: Option<String>,
    /// Pod root URL (overrides the config file; discovered when unset)
    #[arg(long, global = true)]
    pod_url: Option<String>,
    /// Log more; repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the contacts list
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Manage the users (clients) list
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Read and send messages
    Messages {
        #[command(subcommand)]
        action: MessagesAction,
    },
    /// Manage document metadata and sharing
    Documents {
        #[command(subcommand)]
        action: DocumentsAction,
    },
    /// Last-active timestamps
    Activity {
        #[command(subcommand)]
        action: ActivityAction,
    },
    /// Locally persisted client state
    State {
        #[command(subcommand)]
        action: StateAction,
        /// Path to the state database
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ContactsAction {
    /// List all contacts
    List,
    /// Add or replace a contact
    Add {
        username: String,
        given_name: String,
        family_name: String,
        web_id: String,
    },
    /// Delete a contact by username
    Delete { username: String },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List all users
    List {
        /// Include each user's last activity
        #[arg(long)]
        activity: bool,
    },
    /// Add or replace a user
    Add {
        username: String,
        given_name: String,
        family_name: String,
        web_id: String,
        #[arg(long)]
        email: Option<String>,
        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
    },
    /// Delete a user by WebID
    Delete { web_id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum BoxArg {
    Inbox,
    Outbox,
}

impl From<BoxArg> for MailBox {
    fn from(arg: BoxArg) -> Self {
        match arg {
            BoxArg::Inbox => MailBox::Inbox,
            BoxArg::Outbox => MailBox::Outbox,
        }
    }
}

#[derive(Subcommand)]
enum MessagesAction {
    /// List messages in a mailbox
    List {
        #[arg(value_enum, default_value = "inbox")]
        mailbox: BoxArg,
    },
    /// Send a message to another pod's inbox
    Send {
        /// Recipient's pod root URL
        #[arg(long)]
        to_pod: String,
        /// Recipient's display name
        #[arg(long)]
        recipient: String,
        /// Sender's display name
        #[arg(long)]
        sender: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Mark an inbox message read
    Read { message_id: String },
    /// Delete a message
    Delete {
        #[arg(value_enum)]
        mailbox: BoxArg,
        message_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AccessArg {
    None,
    Read,
    Full,
}

impl From<AccessArg> for AccessModes {
    fn from(arg: AccessArg) -> Self {
        match arg {
            AccessArg::None => AccessModes::NONE,
            AccessArg::Read => AccessModes::READ_ONLY,
            AccessArg::Full => AccessModes::FULL,
        }
    }
}

#[derive(Subcommand)]
enum DocumentsAction {
    /// List document metadata
    List,
    /// Record metadata for an uploaded file
    Add {
        name: String,
        #[arg(long = "type")]
        doc_type: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        file_url: String,
        /// Expiry date, YYYY-MM-DD
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    /// Delete a document's metadata
    Delete { name: String },
    /// Grant or revoke an agent's access to a document's file
    Share {
        name: String,
        agent_web_id: String,
        #[arg(long, value_enum, default_value = "read")]
        access: AccessArg,
    },
}

#[derive(Subcommand)]
enum ActivityAction {
    /// Record that the signed-in user is active now
    Update,
    /// Show when the owner of a pod was last active
    Show {
        /// Pod root URL; defaults to the signed-in user's pod
        pod_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Print a stored value
    Get { key: String },
    /// Store a JSON value
    Set { key: String, value: String },
    /// Remove a stored value
    Remove { key: String },
    /// Forget the signed-in session
    ClearSession,
}

fn init_tracing(config: &PassConfig, verbose: u8) {
    let level = match verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_key(name: &str) -> Result<StateKey, Box<dyn Error>> {
    StateKey::parse(name).ok_or_else(|| {
        let known: Vec<&str> = StateKey::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown state key '{}' (known: {})", name, known.join(", ")).into()
    })
}

async fn connect(config: &PassConfig) -> Result<PassClient, Box<dyn Error>> {
    let web_id = config
        .web_id
        .as_deref()
        .ok_or("no WebID configured; pass --web-id or set web_id in the config file")?;
    let pod = HttpPod::new(
        config.access_token.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;
    let client = PassClient::connect(Arc::new(pod), web_id, config.pod_url.as_deref()).await?;
    Ok(match config.cache_stale_secs {
        Some(secs) => PassClient::with_cache(
            client.pod().clone(),
            client.session().clone(),
            Arc::new(CollectionCache::with_stale_time(chrono::Duration::seconds(
                secs as i64,
            ))),
        ),
        None => client,
    })
}

async fn cmd_contacts(client: &PassClient, action: ContactsAction) -> CmdResult {
    let contacts = client.contacts()?;
    let listed = match action {
        ContactsAction::List => contacts.load().await?,
        ContactsAction::Add {
            username,
            given_name,
            family_name,
            web_id,
        } => {
            let contact = Contact::new(username, given_name, family_name, web_id);
            contacts.add(&contact).await?
        }
        ContactsAction::Delete { username } => contacts.delete(&username).await?,
    };
    print_json(&listed)
}

async fn cmd_users(client: &PassClient, action: UsersAction) -> CmdResult {
    let users = client.users()?;
    let listed = match action {
        UsersAction::List { activity } => {
            let loaded = users.load().await?;
            if activity {
                users.with_activity(loaded).await
            } else {
                loaded
            }
        }
        UsersAction::Add {
            username,
            given_name,
            family_name,
            web_id,
            email,
            date_of_birth,
        } => {
            let mut user = User::new(username, given_name, family_name, web_id);
            user.email = email;
            user.date_of_birth = date_of_birth;
            users.add(user).await?
        }
        UsersAction::Delete { web_id } => users.delete(&web_id).await?,
    };
    print_json(&listed)
}

async fn cmd_messages(client: &PassClient, action: MessagesAction) -> CmdResult {
    match action {
        MessagesAction::List { mailbox } => {
            let messages = client.messages(mailbox.into())?.load().await?;
            eprintln!("{} unread", unread_count(&messages));
            print_json(&messages)
        }
        MessagesAction::Send {
            to_pod,
            recipient,
            sender,
            title,
            body,
        } => {
            let message = Message::compose(title, body, sender, &client.session().web_id, recipient);
            client.send_message(&to_pod, &message).await?;
            print_json(&message)
        }
        MessagesAction::Read { message_id } => {
            let messages = client.messages(MailBox::Inbox)?.mark_read(&message_id).await?;
            print_json(&messages)
        }
        MessagesAction::Delete {
            mailbox,
            message_id,
        } => {
            let messages = client.messages(mailbox.into())?.delete(&message_id).await?;
            print_json(&messages)
        }
    }
}

async fn cmd_documents(client: &PassClient, action: DocumentsAction) -> CmdResult {
    let documents = client.documents()?;
    match action {
        DocumentsAction::List => print_json(&documents.load().await?),
        DocumentsAction::Add {
            name,
            doc_type,
            description,
            file_url,
            end_date,
        } => {
            let record = DocumentRecord {
                name,
                doc_type,
                description,
                file_url,
                upload_date: pass::rdf::timestamp_now(),
                end_date,
            };
            print_json(&documents.add(&record).await?)
        }
        DocumentsAction::Delete { name } => print_json(&documents.delete(&name).await?),
        DocumentsAction::Share {
            name,
            agent_web_id,
            access,
        } => {
            let record = documents
                .load()
                .await?
                .into_iter()
                .find(|d| d.name == name)
                .ok_or_else(|| format!("document '{}' not found", name))?;
            documents.share(&record, &agent_web_id, access.into()).await?;
            println!("Updated access for {} on '{}'", agent_web_id, name);
            Ok(())
        }
    }
}

async fn cmd_activity(client: &PassClient, action: ActivityAction) -> CmdResult {
    match action {
        ActivityAction::Update => print_json(&client.update_activity().await?),
        ActivityAction::Show { pod_url } => {
            let pod_url = pod_url.unwrap_or_else(|| client.session().pod_url.clone());
            print_json(&client.user_activity(&pod_url).await)
        }
    }
}

fn cmd_state(config: &PassConfig, db: Option<PathBuf>, action: StateAction) -> CmdResult {
    let store = SqliteState::open(db.unwrap_or_else(|| config.state_db_path()))?;
    match action {
        StateAction::Get { key } => print_json(&store.get(parse_key(&key)?)?),
        StateAction::Set { key, value } => {
            // bare words are stored as strings
            let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            store.set(parse_key(&key)?, value)?;
            Ok(())
        }
        StateAction::Remove { key } => Ok(store.remove(parse_key(&key)?)?),
        StateAction::ClearSession => Ok(store.clear_session()?),
    }
}

async fn run(command: Commands, config: PassConfig) -> CmdResult {
    let command = match command {
        Commands::State { action, db } => return cmd_state(&config, db, action),
        other => other,
    };
    let client = connect(&config).await?;
    match command {
        Commands::Contacts { action } => cmd_contacts(&client, action).await,
        Commands::Users { action } => cmd_users(&client, action).await,
        Commands::Messages { action } => cmd_messages(&client, action).await,
        Commands::Documents { action } => cmd_documents(&client, action).await,
        Commands::Activity { action } => cmd_activity(&client, action).await,
        Commands::State { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut config = match PassConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    if let Some(web_id) = cli.web_id {
        config.web_id = Some(web_id);
    }
    if let Some(pod_url) = cli.pod_url {
        config.pod_url = Some(pod_url);
    }
    init_tracing(&config, cli.verbose);

    if let Err(e) = run(cli.command, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
