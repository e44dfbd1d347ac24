//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the sage-agent CLI.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the S.A.G.E banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
"#,
                " ____    _    ____ _____ ".bright_cyan().bold(),
                "/ ___|  / \\  / ___| ____|".bright_cyan().bold(),
                "\\___ \\ / _ \\| |  _|  _|  ".cyan().bold(),
                "|____/_/  \\_\\____|_____| ".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Search Augmented Generation Engine".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 ____    _    ____ _____
/ ___|  / \  / ___| ____|
\___ \ / _ \| |  _|  _|
|____/_/  \_\____|_____|

   Search Augmented Generation Engine v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a step message (for multi-step operations)
    pub fn step(&self, step_num: u32, total: u32, message: &str) {
        if self.colored {
            println!(
                "  {} {}",
                format!("[{}/{}]", step_num, total).dimmed(),
                message.bright_white()
            );
        } else {
            println!("  [{}/{}] {}", step_num, total, message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print the user prompt for the interactive loop (no trailing newline)
    pub fn prompt(&self) {
        use std::io::Write;
        if self.colored {
            print!("{} ", "You:".bright_green().bold());
        } else {
            print!("You: ");
        }
        let _ = std::io::stdout().flush();
    }

    /// Print an assistant reply
    pub fn assistant(&self, message: &str) {
        if self.colored {
            println!("\n{} {}\n", "Assistant:".bright_cyan().bold(), message);
        } else {
            println!("\nAssistant: {}\n", message);
        }
    }
}
