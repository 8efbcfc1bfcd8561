//! Soroban - CLI Entry Point
//!
//! Commands:
//! - `soroban show <n>` - Draw the beads for a number
//! - `soroban add <a> <b>` - Add two numbers rod by rod
//! - `soroban sub <a> <b>` - Subtract two numbers rod by rod
//! - `soroban test` - Run the built-in self-test

use clap::{Parser, Subcommand};
use soroban::{Abacus, AbacusError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "soroban")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "A soroban abacus simulator with bead-level carry and borrow")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Print abacus state as JSON instead of bead art
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the beads for a number
    Show {
        /// Decimal digits to place on the abacus
        value: String,
        /// Minimum number of rods
        #[arg(short, long, default_value_t = Abacus::DEFAULT_SIZE)]
        width: usize,
    },
    /// Add two numbers rod by rod
    Add {
        a: String,
        b: String,
        /// Minimum number of rods; the final carry is dropped past this width
        #[arg(short, long, default_value_t = Abacus::DEFAULT_SIZE)]
        width: usize,
    },
    /// Subtract two numbers rod by rod
    Sub {
        a: String,
        b: String,
        /// Minimum number of rods
        #[arg(short, long, default_value_t = Abacus::DEFAULT_SIZE)]
        width: usize,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Some(Commands::Show { value, width }) => show(&value, width, cli.json),
        Some(Commands::Add { a, b, width }) => add(&a, &b, width, cli.json),
        Some(Commands::Sub { a, b, width }) => sub(&a, &b, width, cli.json),
        Some(Commands::Test) => {
            run_self_test();
            Ok(())
        }
        None => {
            println!("Soroban v0.1.0");
            println!("A soroban abacus simulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose { "soroban=debug" } else { "soroban=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Parse a digit string and widen it to at least `width` rods.
fn load(value: &str, width: usize) -> Result<Abacus, AbacusError> {
    let parsed = Abacus::parse(value)?;
    Ok(Abacus::with_size(parsed.rods(), width))
}

/// Load two operands at a common width.
fn load_pair(a: &str, b: &str, width: usize) -> Result<(Abacus, Abacus), AbacusError> {
    let a = Abacus::parse(a)?;
    let b = Abacus::parse(b)?;
    let width = width.max(a.len()).max(b.len());
    Ok((Abacus::with_size(a.rods(), width), Abacus::with_size(b.rods(), width)))
}

fn print_abacus(label: &str, abacus: &Abacus, json: bool) {
    if json {
        // Serializing plain rods cannot fail
        let text = serde_json::to_string(abacus).unwrap_or_default();
        println!("{}", text);
    } else {
        println!("{} = {}", label, abacus.to_digits());
        println!("{}", abacus);
        println!();
    }
}

fn show(value: &str, width: usize, json: bool) -> Result<(), AbacusError> {
    let abacus = load(value, width)?;
    print_abacus(value, &abacus, json);
    Ok(())
}

fn add(a: &str, b: &str, width: usize, json: bool) -> Result<(), AbacusError> {
    let (a, b) = load_pair(a, b, width)?;
    let (sum, carry) = soroban::add_with_carry(&a, &b)?;

    if !json {
        print_abacus("a", &a, false);
        print_abacus("b", &b, false);
    }
    print_abacus("a + b", &sum, json);

    if carry != 0 && !json {
        println!("⚠️  Carry dropped past the leftmost rod. Use --width to widen the frame.");
    }
    Ok(())
}

fn sub(a: &str, b: &str, width: usize, json: bool) -> Result<(), AbacusError> {
    let (a, b) = load_pair(a, b, width)?;
    let difference = soroban::sub(&a, &b)?;

    if !json {
        print_abacus("a", &a, false);
        print_abacus("b", &b, false);
    }
    print_abacus("a - b", &difference, json);
    Ok(())
}

fn demo() {
    use soroban::Rod;

    println!("━━━ Soroban Demo ━━━");
    println!();

    println!("Rods (heaven bead, earth beads):");
    for digit in [0u8, 4, 5, 9] {
        let rod = Rod::ALL[digit as usize];
        println!("  {} = {:?}", digit, rod);
    }
    println!();

    let a = Abacus::from_u128(1234, Abacus::DEFAULT_SIZE);
    let b = Abacus::from_u128(987, Abacus::DEFAULT_SIZE);
    println!("{} + {}:", a.to_digits(), b.to_digits());
    match soroban::add(&a, &b) {
        Ok(sum) => println!("{}", sum),
        Err(e) => println!("❌ {}", e),
    }
    println!();

    println!("✓ Core bead arithmetic working!");
}

fn run_self_test() {
    use soroban::{Rod, BeadStateError};

    println!("━━━ Soroban Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let mut check = |name: &str, ok: bool| {
        print!("{}... ", name);
        if ok { println!("✓"); passed += 1; }
        else { println!("✗"); failed += 1; }
    };

    let rod = |u, l| Rod::new(u, l);
    let value = |rods: &[Rod]| Abacus::with_rods(rods).to_u128().ok();

    // Rod encoding
    let digits_ok = (0..=1).all(|u| {
        (0..=4).all(|l| {
            rod(u, l).map(|r| r.digit() as i32) == Ok((if u == 1 { 0 } else { 5 }) + l)
        })
    });
    check("Rod digit encoding", digits_ok);

    check(
        "Rod upper bead validation",
        rod(2, 1) == Err(BeadStateError::Upper(2)) && rod(-1, 1) == Err(BeadStateError::Upper(-1)),
    );
    check(
        "Rod lower bead validation",
        rod(0, 5) == Err(BeadStateError::Lower(5)) && rod(0, -1) == Err(BeadStateError::Lower(-1)),
    );

    // Abacus value
    let values_ok = match (rod(1, 1), rod(0, 1), rod(0, 3), rod(0, 2)) {
        (Ok(one), Ok(six), Ok(eight), Ok(seven)) => {
            Abacus::new().to_u128().ok() == Some(0)
                && value(&[one]) == Some(1)
                && value(&[one, one]) == Some(11)
                && value(&[six, one]) == Some(61)
                && value(&[six, eight, seven]) == Some(687)
        }
        _ => false,
    };
    check("Abacus integer value", values_ok);

    let expected = "O O O O O\n| | | | |\n---------\n| | | | |\nO O O O O\nO O O O O\nO O O O O\nO O O O O";
    check("Default abacus rendering", Abacus::new().to_string() == expected);

    // Arithmetic
    let add_value = |x: u128, y: u128| {
        soroban::add(&Abacus::from_u128(x, 5), &Abacus::from_u128(y, 5))
            .ok()
            .and_then(|r| r.to_u128().ok())
    };
    let sub_value = |x: u128, y: u128| {
        soroban::sub(&Abacus::from_u128(x, 5), &Abacus::from_u128(y, 5))
            .ok()
            .and_then(|r| r.to_u128().ok())
    };
    check("Addition 2 + 2 = 4", add_value(2, 2) == Some(4));
    check("Addition 5 + 5 = 10 (carry)", add_value(5, 5) == Some(10));
    check("Addition 99 + 1 = 100 (carry chain)", add_value(99, 1) == Some(100));
    check("Addition overflow drops carry", add_value(99_999, 1) == Some(0));
    check("Subtraction 5 - 2 = 3", sub_value(5, 2) == Some(3));
    check("Subtraction 10 - 1 = 9 (borrow)", sub_value(10, 1) == Some(9));
    check("Subtraction 100 - 1 = 99 (borrow chain)", sub_value(100, 1) == Some(99));
    check("Subtraction underflow rejected", sub_value(1, 2).is_none());

    // Round trip
    let roundtrip_ok = [0u128, 7, 42, 687, 99_999].iter().all(|&n| {
        Abacus::from_u128(n, 5).to_u128().ok() == Some(n)
    });
    check("Integer roundtrip", roundtrip_ok);

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
