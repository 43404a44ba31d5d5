use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use ymapi::net::types::DEFAULT_MFA_LANG;
use ymapi::{
    ApiClient, ApiConfig, ApiError, ConfigError, FileStorage, MfaSend, MfaValidate, QueryParams, SendSms, StorageError,
    TokenStore, UploadContents,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing token; pass --token, set YM_TOKEN, or run `ym-cli login`")]
    MissingToken,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("token storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "ym-cli", about = "call2all SMS and session API CLI")]
struct Cli {
    #[arg(long, env = "YM_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "YM_API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[arg(long, env = "YM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "YM_TOKEN_FILE", help = "Where the login token is stored")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

struct CliContext {
    api: ApiClient,
    store: TokenStore<FileStorage>,
    token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the returned token.
    Login { username: String, password: String },
    /// Forget the stored token.
    Logout,
    /// Print the stored token.
    Token,
    Session,
    IncomingSms {
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    SmsOutLog {
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    TextFile(TextFileCommand),
    SendSms(SendSmsArgs),
    Mfa(MfaCommand),
}

#[derive(Args, Debug)]
struct TextFileCommand {
    #[command(subcommand)]
    command: TextFileSubcommand,
}

#[derive(Subcommand, Debug)]
enum TextFileSubcommand {
    Get {
        what: String,
    },
    Upload {
        what: String,
        #[arg(long, required_unless_present = "json", conflicts_with = "json")]
        contents: Option<String>,
        #[arg(long, help = "JSON value, uploaded in its serialized form")]
        json: Option<String>,
    },
}

#[derive(Args, Debug)]
struct SendSmsArgs {
    #[arg(long)]
    phones: String,
    #[arg(long)]
    message: String,
    #[arg(long)]
    caller_id: Option<String>,
    #[arg(long = "param", value_parser = parse_key_value, help = "Extra key=value parameter, repeatable")]
    params: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct MfaCommand {
    #[command(subcommand)]
    command: MfaSubcommand,
}

#[derive(Subcommand, Debug)]
enum MfaSubcommand {
    IsPass,
    Try,
    Methods,
    Send {
        #[arg(long)]
        mfa_id: String,
        #[arg(long)]
        send_type: String,
        #[arg(long, default_value = DEFAULT_MFA_LANG)]
        lang: String,
        #[arg(long)]
        auto_otp_hostname: Option<String>,
    },
    Validate {
        code: String,
        #[arg(long, default_value_t = false)]
        remember_me: bool,
        #[arg(long, default_value = "")]
        remember_note: String,
    },
    Action {
        action: String,
        #[arg(long = "param", value_parser = parse_key_value, help = "key=value parameter, repeatable")]
        params: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ApiConfig::from_vars(cli.base_url.as_deref(), None)?;
    config.timeout_secs = cli.timeout_secs;

    let token_file = cli.token_file.unwrap_or_else(default_token_file);
    let ctx = CliContext {
        api: ApiClient::new(config)?,
        store: TokenStore::new(FileStorage::new(token_file)),
        token: cli.token,
    };

    match cli.command {
        Command::Login { username, password } => run_login(&ctx, &username, &password).await,
        Command::Logout => run_logout(&ctx),
        Command::Token => {
            println!("{}", ctx.store.get_stored_token()?);
            Ok(())
        }
        Command::Session => {
            let token = resolve_token(&ctx)?;
            print_json(&ctx.api.get_session(&token).await?)
        }
        Command::IncomingSms { limit } => {
            let token = resolve_token(&ctx)?;
            print_json(&ctx.api.get_incoming_sms(&token, limit).await?)
        }
        Command::SmsOutLog { limit } => {
            let token = resolve_token(&ctx)?;
            print_json(&ctx.api.get_sms_out_log(&token, limit).await?)
        }
        Command::TextFile(text_file) => run_text_file(&ctx, text_file).await,
        Command::SendSms(args) => run_send_sms(&ctx, args).await,
        Command::Mfa(mfa) => run_mfa(&ctx, mfa).await,
    }
}

async fn run_login(ctx: &CliContext, username: &str, password: &str) -> Result<(), CliError> {
    let response = ctx.api.login(username, password).await?;
    match response.token() {
        Some(token) if !token.is_empty() => {
            ctx.store.set_stored_token(token)?;
            tracing::info!(path = %ctx.store.storage().path().display(), "token stored");
        }
        _ => tracing::warn!("login response carried no token; stored token left unchanged"),
    }
    print_json(response.as_value())
}

fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    ctx.store.clear_stored_token()?;
    tracing::info!(path = %ctx.store.storage().path().display(), "token cleared");
    Ok(())
}

async fn run_text_file(ctx: &CliContext, text_file: TextFileCommand) -> Result<(), CliError> {
    let token = resolve_token(ctx)?;
    match text_file.command {
        TextFileSubcommand::Get { what } => print_json(&ctx.api.get_text_file(&token, &what).await?),
        TextFileSubcommand::Upload { what, contents, json } => {
            let contents = upload_contents(contents, json.as_deref())?;
            print_json(&ctx.api.upload_text_file(&token, &what, contents).await?)
        }
    }
}

async fn run_send_sms(ctx: &CliContext, args: SendSmsArgs) -> Result<(), CliError> {
    let token = resolve_token(ctx)?;
    let mut sms = SendSms::new(args.phones, args.message);
    if let Some(caller_id) = args.caller_id {
        sms = sms.with_caller_id(caller_id);
    }
    for (key, value) in args.params {
        sms = sms.with_param(key, value);
    }
    print_json(&ctx.api.send_sms(&token, &sms).await?)
}

async fn run_mfa(ctx: &CliContext, mfa: MfaCommand) -> Result<(), CliError> {
    let token = resolve_token(ctx)?;
    let value = match mfa.command {
        MfaSubcommand::IsPass => ctx.api.mfa_is_pass(&token).await?,
        MfaSubcommand::Try => ctx.api.mfa_try(&token).await?,
        MfaSubcommand::Methods => ctx.api.mfa_get_methods(&token).await?,
        MfaSubcommand::Send {
            mfa_id,
            send_type,
            lang,
            auto_otp_hostname,
        } => {
            let mut send = MfaSend::new(mfa_id, send_type).with_lang(lang);
            if let Some(hostname) = auto_otp_hostname {
                send = send.with_auto_otp_hostname(hostname);
            }
            ctx.api.mfa_send(&token, &send).await?
        }
        MfaSubcommand::Validate {
            code,
            remember_me,
            remember_note,
        } => {
            let validate = MfaValidate::new(code)
                .with_remember_me(remember_me)
                .with_remember_note(remember_note);
            ctx.api.mfa_validate(&token, &validate).await?
        }
        MfaSubcommand::Action { action, params } => {
            let params: QueryParams = params
                .into_iter()
                .map(|(k, v)| (k, Some(v)))
                .collect();
            ctx.api
                .mfa_action(&token, action.as_str(), &params)
                .await?
        }
    };
    print_json(&value)
}

fn resolve_token(ctx: &CliContext) -> Result<String, CliError> {
    if let Some(token) = ctx.token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(token.to_owned());
    }
    let stored = ctx.store.get_stored_token()?;
    if stored.is_empty() {
        return Err(CliError::MissingToken);
    }
    Ok(stored)
}

fn upload_contents(contents: Option<String>, json: Option<&str>) -> Result<UploadContents, CliError> {
    match (contents, json) {
        (_, Some(raw)) => Ok(UploadContents::Json(serde_json::from_str::<Value>(raw)?)),
        (Some(text), None) => Ok(UploadContents::Text(text)),
        (None, None) => Ok(UploadContents::Text(String::new())),
    }
}

fn default_token_file() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(".ym-cli-token.json"),
        |dir| dir.join("ym-cli").join("token.json"),
    )
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
