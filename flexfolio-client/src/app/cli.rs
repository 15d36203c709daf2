use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use flexfolio_model::ProfileField;

#[derive(Parser, Debug)]
#[command(
    name = "flexfolio",
    version,
    about = "Browse FlexFolio portfolios and manage your own profile"
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./flexfolio.toml when present)
    #[arg(long, global = true, env = "FLEXFOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Access token of the signed-in user
    #[arg(
        long,
        global = true,
        env = "FLEXFOLIO_ACCESS_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every public portfolio
    Directory,
    /// Show one public profile
    User {
        /// User id as shown in the directory
        id: String,
    },
    /// View or edit your own profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    Show,
    /// Change fields of your profile; omitted fields keep their value
    Edit(ProfileEdits),
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProfileEdits {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    /// Years of experience
    #[arg(long)]
    pub experience: Option<String>,
    /// Personal website; pass an empty value to clear
    #[arg(long)]
    pub website: Option<String>,
    /// LinkedIn username or profile URL
    #[arg(long)]
    pub linkedin: Option<String>,
    /// GitHub username or profile URL
    #[arg(long)]
    pub github: Option<String>,
    #[arg(long)]
    pub discord: Option<String>,
    /// Profile photo URL
    #[arg(long)]
    pub photo: Option<String>,
}

impl ProfileEdits {
    /// Requested changes in form order.
    pub fn changes(&self) -> Vec<(ProfileField, String)> {
        [
            (ProfileField::Name, &self.name),
            (ProfileField::Company, &self.company),
            (ProfileField::Role, &self.role),
            (ProfileField::Experience, &self.experience),
            (ProfileField::ProfilePhoto, &self.photo),
            (ProfileField::Website, &self.website),
            (ProfileField::LinkedIn, &self.linkedin),
            (ProfileField::GitHub, &self.github),
            (ProfileField::Discord, &self.discord),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}
