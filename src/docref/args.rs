use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docref")]
#[command(
    about = "Keep file URIs stored in JSON records in sync with the files they point at",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Operate on the global store instead of ./.docref
    #[arg(short, long, global = true)]
    pub global: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a record from a JSON file
    #[command(alias = "new")]
    Create {
        /// Path to the record data; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// List records
    #[command(alias = "ls")]
    List {
        /// Show deleted records
        #[arg(long)]
        deleted: bool,
    },

    /// Print a record's JSON data
    Show {
        /// Record id (a unique prefix is enough)
        id: String,
    },

    /// Soft-delete a record
    Delete {
        /// Record id (a unique prefix is enough)
        id: String,
    },

    /// Print the referenced file's contents
    Cat {
        /// Record id (a unique prefix is enough)
        id: String,

        /// JSON Pointer to the URI inside the record
        #[arg(short, long, default_value = "/document/uri")]
        pointer: String,
    },

    /// Copy the referenced file, printing the patch for the copy
    Cp {
        /// Record id (a unique prefix is enough)
        id: String,

        /// Destination URI
        destination: String,

        /// JSON Pointer to the URI inside the record
        #[arg(short, long, default_value = "/document/uri")]
        pointer: String,
    },

    /// Move the referenced file and update the record
    Mv {
        /// Record id (a unique prefix is enough)
        id: String,

        /// Destination URI
        destination: String,

        /// JSON Pointer to the URI inside the record
        #[arg(short, long, default_value = "/document/uri")]
        pointer: String,
    },

    /// Clear a document reference
    Rm {
        /// Record id (a unique prefix is enough)
        id: String,

        /// JSON Pointer to the URI inside the record
        #[arg(short, long, default_value = "/document/uri")]
        pointer: String,

        /// Also delete the referenced file
        #[arg(short, long)]
        force: bool,
    },

    /// Overwrite the referenced file's contents
    Setcontents {
        /// Record id (a unique prefix is enough)
        id: String,

        /// Path to the new contents; reads stdin when omitted
        source: Option<PathBuf>,

        /// JSON Pointer to the URI inside the record
        #[arg(short, long, default_value = "/document/uri")]
        pointer: String,
    },

    /// Initialize the record store
    Init,
}
