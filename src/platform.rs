/// The two path conventions the glue distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn separator(self) -> char {
        match self {
            Platform::Unix => '/',
            Platform::Windows => '\\',
        }
    }

    /// Environment variable holding the user's home directory.
    pub fn home_var(self) -> &'static str {
        match self {
            Platform::Unix => "HOME",
            Platform::Windows => "USERPROFILE",
        }
    }

    /// Shell argv prefix used to run a piped command string.
    pub fn default_executor(self) -> Vec<String> {
        let argv: [&str; 2] = match self {
            Platform::Unix => ["bash", "-c"],
            Platform::Windows => ["cmd.exe", "/c"],
        };
        argv.iter().map(|arg| arg.to_string()).collect()
    }
}
