use clap::Parser;
use pwforge::{GenerationSpec, Generator};

#[derive(Parser, Debug)]
#[command(name = "pwforge")]
#[command(about = "Generate random passwords from a cryptographically secure source")]
pub struct Args {
    /// Total number of characters in each password
    #[arg(short, long, env = "PWFORGE_LENGTH", default_value_t = 32)]
    pub length: usize,

    /// Number of digits in each password
    #[arg(short, long, env = "PWFORGE_DIGITS", default_value_t = 6)]
    pub digits: usize,

    /// Number of symbols in each password
    #[arg(short, long, env = "PWFORGE_SYMBOLS", default_value_t = 6)]
    pub symbols: usize,

    /// Exclude uppercase letters
    #[arg(long)]
    pub no_upper: bool,

    /// Allow characters to repeat
    #[arg(long)]
    pub allow_repeat: bool,

    /// Number of passwords to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Replace the lowercase letter pool
    #[arg(long, env = "PWFORGE_LOWER_LETTERS")]
    pub lower_letters: Option<String>,

    /// Replace the uppercase letter pool
    #[arg(long, env = "PWFORGE_UPPER_LETTERS")]
    pub upper_letters: Option<String>,

    /// Replace the digit pool
    #[arg(long, env = "PWFORGE_DIGIT_CHARS")]
    pub digit_chars: Option<String>,

    /// Replace the symbol pool
    #[arg(long, env = "PWFORGE_SYMBOL_CHARS")]
    pub symbol_chars: Option<String>,

    /// Print the passwords as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Log generation details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn spec(&self) -> GenerationSpec {
        GenerationSpec::new(self.length)
            .digits(self.digits)
            .symbols(self.symbols)
            .no_upper(self.no_upper)
            .allow_repeat(self.allow_repeat)
    }

    /// The default generator with every pool override applied.
    pub fn generator(&self) -> Generator {
        let mut generator = Generator::new();
        if let Some(pool) = &self.lower_letters {
            generator = generator.with_lower_letters(pool);
        }
        if let Some(pool) = &self.upper_letters {
            generator = generator.with_upper_letters(pool);
        }
        if let Some(pool) = &self.digit_chars {
            generator = generator.with_digits(pool);
        }
        if let Some(pool) = &self.symbol_chars {
            generator = generator.with_symbols(pool);
        }
        generator
    }
}
