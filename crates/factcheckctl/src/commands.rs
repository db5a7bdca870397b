//! Command implementations
//!
//! Each command returns the process exit code.

use crate::cli::{CheckArgs, ExtractionArg, ScorePolicyArg};
use crate::exit_codes::{self, EXIT_CONFIG, EXIT_SUCCESS};
use crate::render::{self, CheckReport};
use crate::spinner::Spinner;
use anyhow::{Context, Result};
use factcheck_common::config::CONFIG_ENV;
use factcheck_common::{
    rate, select_target, CheckController, CheckError, ConfigSource, FactCheckConfig, FactChecker,
    HttpTransport, Interpreter, ModelId,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Text from the argument, a file, or stdin, in that order
pub fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

pub async fn check(args: CheckArgs, color: bool) -> Result<i32> {
    let config = FactCheckConfig::load();
    let token = match config.api_token() {
        Ok(token) => token,
        Err(e) => {
            let err = CheckError::from(e);
            eprintln!("{}", render::error(&err.to_string(), color));
            return Ok(exit_codes::for_error(&err));
        }
    };

    let profile = args.mode.profile();
    let requested = args.model.as_deref().map(ModelId::new);
    let model = profile.resolve_model(requested.as_ref());
    if requested.is_some() && !profile.model_selectable {
        info!("{} screen always uses {}", profile.name, profile.default_model);
    }

    let input = read_input(args.text, args.file.as_deref())?;
    let previous = match &args.previous {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => String::new(),
    };
    let target = select_target(&input, args.select, &previous, args.select_output);
    debug!("Checking {} of {} input chars", target.chars().count(), input.chars().count());

    let transport = HttpTransport::new(config.timeout_secs)?;
    let checker = FactChecker::new(transport, profile, &config, token);
    let mut controller = CheckController::new(config.stale_reply);
    controller.set_input(input.as_str());

    let spinner = Spinner::new("Fact-checking...");
    let session = controller.run(&checker, target, Some(&model)).await;
    let elapsed = spinner.stop();
    debug!("Check finished in {:.1}s", elapsed.as_secs_f64());

    if args.json {
        let report = CheckReport::from_session(checker.profile().name, &model, session);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if session.result().is_some() || session.message().is_none() {
        print!("{}", render::session(session, color));
    } else {
        eprint!("{}", render::session(session, color));
    }
    Ok(exit_codes::for_session(session))
}

pub fn interpret(
    file: Option<PathBuf>,
    score_policy: Option<ScorePolicyArg>,
    extraction: Option<ExtractionArg>,
    json: bool,
    color: bool,
) -> Result<i32> {
    let config = FactCheckConfig::load();
    let interpreter = Interpreter::new(
        score_policy.map(Into::into).unwrap_or(config.score_policy),
        extraction.map(Into::into).unwrap_or(config.extraction),
    );

    let raw = read_input(None, file.as_deref())?;
    let result = interpreter.interpret(&raw);
    if let Some(reason) = result.fallback_reason() {
        debug!("Fallback: {}", reason);
    }

    if json {
        let value = serde_json::json!({
            "score": result.score(),
            "analysis": result.analysis(),
            "used_fallback": result.used_fallback(),
            "rating": rate(result.score()),
            "notice": result.notice(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render::result(&result, color));
    }
    Ok(EXIT_SUCCESS)
}

pub fn rate_score(score: Option<i64>, json: bool, color: bool) -> Result<i32> {
    if json {
        println!("{}", serde_json::to_string(&rate(score))?);
    } else {
        println!("{}", render::badge(score, color));
    }
    Ok(EXIT_SUCCESS)
}

pub fn models() -> Result<i32> {
    print!("{}", render::models());
    Ok(EXIT_SUCCESS)
}

pub fn config(init: bool) -> Result<i32> {
    let path = FactCheckConfig::default_path();

    if init {
        let Some(path) = path else {
            eprintln!("No config directory available; set {}", CONFIG_ENV);
            return Ok(EXIT_CONFIG);
        };
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(EXIT_SUCCESS);
        }
        FactCheckConfig::save_default(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(EXIT_SUCCESS);
    }

    let (config, source) = FactCheckConfig::load_with_source(path);
    let token_status = match config.api_token() {
        Ok(_) => "set",
        Err(_) => "missing",
    };
    match &source {
        ConfigSource::File(p) => println!("# {}", p.display()),
        ConfigSource::NotFound(p) => println!("# {} (not found, using defaults)", p.display()),
        ConfigSource::Invalid(p, e) => {
            println!("# {} (invalid, using defaults)", p.display());
            for line in e.to_string().lines() {
                println!("# {}", line);
            }
        }
        ConfigSource::Defaults => println!("# defaults"),
    }
    print!("{}", toml::to_string_pretty(&config)?);
    println!("# token (${}): {}", config.api_key_env, token_status);
    Ok(EXIT_SUCCESS)
}
