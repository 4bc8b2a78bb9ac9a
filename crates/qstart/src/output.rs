//! Terminal output utilities

use console::style;

/// Copyright and warranty notice shown unless running silently
pub const BANNER: &[&str] = &[
    "Copyright (c) 2017 Jarek Zgoda",
    "This is free software; see the source for copying conditions.  There is NO",
    "warranty; not even for MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.",
];

/// Print the startup banner
pub fn banner() {
    for line in BANNER {
        println!("{}", line);
    }
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}
