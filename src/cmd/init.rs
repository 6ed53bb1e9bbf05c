//! Init command implementation
//!
//! Handles the `src-slim init` command which creates a configuration file
//! from a profile (safe, balanced, aggressive)

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::config::{self, ConfigFile, Profile, ProfileType};
use crate::error::SrcSlimError;
use crate::fmt::{CHECKMARK, INFO, SPARKLES, WARNING};

/// Initialize src-slim configuration from a profile
///
/// Creates a `.src-slim.toml` configuration file in `project_root`. An
/// existing file is left alone unless `force` is set.
///
/// # Examples
///
/// ```no_run
/// use src_slim::cmd::init::cmd_init;
/// use std::path::Path;
///
/// // Initialize with the balanced profile
/// cmd_init(Path::new("."), "balanced", false)?;
///
/// // Overwrite with the aggressive profile
/// cmd_init(Path::new("."), "aggressive", true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(project_root: &Path, profile_name: &str, force: bool) -> Result<()> {
    println!(
        "{} {} Initializing src-slim",
        SPARKLES,
        style("src-slim init").bold()
    );
    println!();

    if config::ConfigLoader::exists(project_root) && !force {
        println!(
            "{} Config file already exists: {}",
            WARNING,
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Pass --force to overwrite it, or edit it manually.");
        return Ok(());
    }

    let profile = Profile::get(profile_name).ok_or_else(|| SrcSlimError::InvalidProfile {
        name: profile_name.to_string(),
        available: Profile::names().iter().map(|n| n.to_string()).collect(),
    })?;

    println!(
        "{} Selected profile: {}",
        SPARKLES,
        style(&profile.name).bold().cyan()
    );
    println!("   {}", style(&profile.description).dim());
    println!();

    present_pipeline(&profile);

    if !profile.notes.is_empty() {
        println!("{}  Notes:", INFO);
        for note in &profile.notes {
            println!("   {} {}", style("•").dim(), note);
        }
        println!();
    }

    let config = ConfigFile::for_profile(profile.profile_type);
    config::ConfigLoader::save(&config, project_root)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!();
    println!("{}  Next Steps:", style("💡").bold());
    println!(
        "   1. Review and customize {} if needed",
        config::CONFIG_FILE_NAME
    );
    println!(
        "   2. Run {} to write the minified files",
        style("src-slim minify").cyan()
    );
    println!(
        "   3. Run {} to remove them again",
        style("src-slim clean").cyan()
    );
    println!();

    println!("{}  Available Profiles:", INFO);
    for other in ProfileType::ALL.into_iter().map(Profile::new) {
        let indicator = if other.profile_type == profile.profile_type {
            "→"
        } else {
            " "
        };
        println!(
            "   {} {} - {}",
            style(indicator).cyan().bold(),
            style(&other.name).bold(),
            style(&other.description).dim()
        );
    }

    Ok(())
}

/// Present the pipeline settings a profile applies
fn present_pipeline(profile: &Profile) {
    let pipeline = &profile.pipeline;
    println!("{}  Profile Settings:", INFO);
    match &pipeline.actions {
        Some(actions) => {
            let names: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
            println!("   {} actions = {}", style("•").dim(), style(names.join(", ")).green());
        }
        None => println!(
            "   {} actions = {}",
            style("•").dim(),
            style("language defaults").green()
        ),
    }
    if let Some(indentation) = pipeline.indentation {
        println!(
            "   {} indentation = {}",
            style("•").dim(),
            style(indentation.as_str()).green()
        );
    }
    if let Some(keep) = pipeline.keep_line_parity {
        println!(
            "   {} keep-line-parity = {}",
            style("•").dim(),
            style(keep).green()
        );
    }
    println!();
}
