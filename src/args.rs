use clap::Parser;

/// GitHub profile lookup CLI: shows a user's profile card and their
/// most-starred repositories.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "Look up a GitHub user by login and render their profile and top repositories. Without a username, queries are read from stdin, one per line."
)]
pub struct Args {
    /// GitHub login to look up. Reads queries from stdin when omitted.
    pub username: Option<String>,

    /// Also write each rendered page to this HTML file.
    #[clap(long, value_name = "PATH")]
    pub html: Option<String>,

    /// Do not draw the loading spinner.
    #[clap(short = 'q', long)]
    pub quiet_spinner: bool,
}
