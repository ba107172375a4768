//! CLI for the mazebot challenge

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mazebot::{
    client::{MazebotClient, DEFAULT_BASE_URL},
    Algorithm, Maze,
};

/// Solve mazebot mazes, locally or against the challenge service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path search algorithm
    #[arg(short, long, value_enum, default_value_t = SolverChoice::FloodFill)]
    algorithm: SolverChoice,

    /// Base URL of the challenge service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SolverChoice {
    /// Distance labeling plus greedy descent; always a shortest path
    FloodFill,
    /// Backtracking search; first path found under N, W, S, E priority
    DepthFirst,
}

impl From<SolverChoice> for Algorithm {
    fn from(choice: SolverChoice) -> Self {
        match choice {
            SolverChoice::FloodFill => Algorithm::FloodFill,
            SolverChoice::DepthFirst => Algorithm::DepthFirst,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a maze read from a file, without talking to the service
    Solve {
        /// File with the maze. Use `-` for stdin.
        file: PathBuf,
    },
    /// Fetch one random maze, solve it and submit the solution
    Random,
    /// Race mode: solve mazes back to back until the server stops
    Race {
        /// Identifier submitted when starting the race
        #[arg(short, long)]
        login: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let algorithm = Algorithm::from(args.algorithm);

    match args.command {
        Command::Solve { file } => {
            let text = if file.to_str() == Some("-") {
                let mut buf = String::new();
                io::stdin().lock().read_to_string(&mut buf)?;
                buf
            } else {
                fs::read_to_string(file)?
            };
            let maze = Maze::parse(text.trim_end())?;
            let solution = maze.solve(algorithm)?;
            solution.print_report();
        }
        Command::Random => {
            let client = MazebotClient::new(args.base_url);
            let description = client.random_maze().await?;
            println!("Fetched {}", description.name);

            let maze = description.to_maze()?;
            let solution = maze.solve(algorithm)?;
            solution.print_report();

            let outcome = client
                .submit_solution(&description.maze_path, &solution.directions())
                .await?;
            println!(
                "{}: {}",
                outcome.result,
                outcome.message.unwrap_or_default()
            );
        }
        Command::Race { login } => {
            let client = MazebotClient::new(args.base_url);
            run_race(&client, &login, algorithm).await?;
        }
    }
    Ok(())
}

/// Sequential solve-submit chain: each acknowledgment carries the path of
/// the next maze until the server leaves it out.
async fn run_race(client: &MazebotClient, login: &str, algorithm: Algorithm) -> anyhow::Result<()> {
    let start = client.start_race(login).await?;
    if let Some(message) = &start.message {
        println!("{message}");
    }

    let mut next = Some(start.next_maze);
    let mut solved = 0usize;
    while let Some(path) = next {
        let description = client.fetch_maze(&path).await?;
        let maze = description.to_maze().context("invalid maze from server")?;
        let solution = maze.solve(algorithm)?;

        let outcome = client
            .submit_solution(&description.maze_path, &solution.directions())
            .await?;
        solved += 1;
        println!(
            "{} ({} steps): {}",
            description.name,
            solution.path.len(),
            outcome.result
        );

        if let Some(certificate) = &outcome.certificate {
            println!("Certificate: {certificate}");
        }
        next = outcome.next_maze;
    }
    println!("Race finished after {solved} mazes.");
    Ok(())
}
