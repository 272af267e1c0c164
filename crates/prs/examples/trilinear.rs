// Homomorphic secret sharing of the product of three secret inputs.

mod util;

use std::{env, error::Error, process::exit};

use console::style;
use prs::hss::{
    decode, direct_evaluate, AdditiveSharing, Evaluator, HssConfig, PartialResult,
};
use prs::prs::{Plaintext, PrsParametersBuilder, SecretKey};
use rand::rngs::OsRng;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use util::{parse_flag, timeit::timeit};

fn print_notice_and_exit(error: Option<String>) -> ! {
    println!(
        "{} Product of three secret inputs with homomorphic secret sharing",
        style("  overview:").magenta().bold()
    );
    println!(
        "{} trilinear [-h] [--help] [--num_servers=<value>] [--k=<value>] [--n_bits=<value>] [--base_size=<value>]",
        style("     usage:").magenta().bold()
    );
    println!(
        "{} {} must be at least 2, {} must be even and at least 2 * ({} + 16), and {} at most {}",
        style("constraints:").magenta().bold(),
        style("num_servers").blue(),
        style("n_bits").blue(),
        style("k").blue(),
        style("base_size").blue(),
        style("k").blue(),
    );
    if let Some(error) = error {
        println!("{} {}", style("     error:").red().bold(), error);
    }
    exit(0);
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    // Print the help if requested.
    if args.contains(&"-h".to_string()) || args.contains(&"--help".to_string()) {
        print_notice_and_exit(None)
    }

    let mut num_servers = 10;
    let mut k = 1024;
    let mut n_bits = 4096;
    let mut base_size = 512;

    for arg in &args {
        let parsed = [
            ("--num_servers", &mut num_servers),
            ("--k", &mut k),
            ("--n_bits", &mut n_bits),
            ("--base_size", &mut base_size),
        ]
        .into_iter()
        .find_map(|(name, value)| parse_flag(arg, name).map(|r| (r, value)));
        match parsed {
            Some((Ok(v), value)) => *value = v,
            Some((Err(e), _)) => print_notice_and_exit(Some(e)),
            None => print_notice_and_exit(Some(format!("Unrecognized argument: {arg}"))),
        }
    }

    println!("# Trilinear product with HSS");
    println!("\tnum_servers = {num_servers}");
    println!("\tk = {k}");
    println!("\tn_bits = {n_bits}");
    println!("\tbase_size = {base_size}");

    let params = match PrsParametersBuilder::new()
        .set_message_bits(k)
        .set_modulus_bits(n_bits)
        .set_base_size(base_size)
        .build_arc()
    {
        Ok(params) => params,
        Err(e) => print_notice_and_exit(Some(e.to_string())),
    };
    let config = match HssConfig::trilinear(num_servers, &params) {
        Ok(config) => config,
        Err(e) => print_notice_and_exit(Some(e.to_string())),
    };

    let mut rng = OsRng;

    let sk = timeit!("Key generation", SecretKey::random(&params, &mut rng)?);
    let pk = sk.public_key();
    info!(
        "Public key: n = {}, y = {}, k = {}, 2^k = {}",
        pk.n(),
        pk.y(),
        k,
        params.plaintext_modulus()
    );

    let inputs = (0..3)
        .map(|_| Plaintext::random(&params, &mut rng))
        .collect::<Vec<_>>();
    info!("Drew {} random inputs", inputs.len());

    let expected = timeit!("Direct computation", direct_evaluate(&inputs, &params)?);

    let sharing = AdditiveSharing::new(&config, pk)?;
    let (shares, encrypted) = timeit!("Sharing", sharing.share_all(&inputs, &mut rng)?);

    let evaluator = Evaluator::new(&config, pk)?;
    let start = std::time::Instant::now();
    let partials = (0..num_servers)
        .map(|i| -> prs::Result<PartialResult> {
            let partial = timeit!(
                format!("Evaluation by server {i}"),
                evaluator.evaluate(i, &shares, &encrypted, &mut rng)?
            );
            info!(
                "Server {} output: {}",
                partial.server(),
                partial.ciphertext().value()
            );
            Ok(partial)
        })
        .collect::<prs::Result<Vec<_>>>()?;
    println!(
        "⏱  Average evaluation: {}",
        util::DisplayDuration(start.elapsed() / num_servers as u32)
    );

    let parallel = timeit!(
        "Parallel evaluation",
        evaluator.evaluate_all(&shares, &encrypted, &mut rng)?
    );

    let result = timeit!("Decoding", decode(&partials, &sk)?);
    let result_parallel = decode(&parallel, &sk)?;

    if result == expected && result_parallel == expected {
        println!("{}", style("Decoded product matches the direct computation").green());
    } else {
        println!("{}", style("Decoded product differs from the direct computation").red());
        exit(1);
    }

    Ok(())
}
