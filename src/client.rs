//! HTTP client for the mazebot service
//!
//! Thin wrapper around the challenge endpoints: fetch a maze, post a
//! solution, start a race. The solver itself never performs I/O; this
//! module only moves grids in and direction strings out.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::{Maze, MazeError, Point};

/// Endpoint host of the public challenge.
pub const DEFAULT_BASE_URL: &str = "https://api.noopschallenge.com";

#[derive(Debug, Clone)]
pub struct MazebotClient {
    base_url: String,
    client: reqwest::Client,
}

/// One maze instance as the API delivers it.
#[derive(Debug, Deserialize)]
pub struct MazeDescription {
    pub name: String,
    #[serde(rename = "mazePath")]
    pub maze_path: String,
    #[serde(rename = "startingPosition")]
    pub starting_position: [usize; 2],
    #[serde(rename = "endingPosition")]
    pub ending_position: [usize; 2],
    pub map: Vec<String>,
}

impl MazeDescription {
    /// Build the in-memory grid from the delivered rows and positions.
    pub fn to_maze(&self) -> Result<Maze, MazeError> {
        let [sx, sy] = self.starting_position;
        let [ex, ey] = self.ending_position;
        Maze::from_rows(&self.map, Point::new(sx, sy), Point::new(ex, ey))
    }
}

#[derive(Debug, Serialize)]
struct SolutionRequest<'a> {
    directions: &'a str,
}

#[derive(Debug, Serialize)]
struct RaceStartRequest<'a> {
    login: &'a str,
}

/// Acknowledgment for a submitted solution.
///
/// In race mode `next_maze` points at the maze to fetch next; the server
/// leaves it out after the final maze.
#[derive(Debug, Deserialize)]
pub struct SolveResult {
    pub result: String,
    pub message: Option<String>,
    #[serde(rename = "shortestSolutionLength")]
    pub shortest_solution_length: Option<usize>,
    #[serde(rename = "yourSolutionLength")]
    pub your_solution_length: Option<usize>,
    pub elapsed: Option<f64>,
    #[serde(rename = "nextMaze")]
    pub next_maze: Option<String>,
    pub certificate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RaceStart {
    pub message: Option<String>,
    #[serde(rename = "nextMaze")]
    pub next_maze: String,
}

impl MazebotClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// GET `/mazebot/random`.
    pub async fn random_maze(&self) -> Result<MazeDescription> {
        self.fetch_maze("/mazebot/random").await
    }

    /// GET an arbitrary maze path, e.g. one taken from `next_maze`.
    pub async fn fetch_maze(&self, path: &str) -> Result<MazeDescription> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "fetching maze {} failed with status {}: {}",
                path,
                status,
                text
            ));
        }

        Ok(response.json().await?)
    }

    /// POST a direction string to the maze's own path.
    ///
    /// A rejected solution comes back as a non-success status and is
    /// surfaced as an error together with the response body.
    pub async fn submit_solution(&self, maze_path: &str, directions: &str) -> Result<SolveResult> {
        let url = format!("{}{}", self.base_url, maze_path);
        let request = SolutionRequest { directions };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "solution for {} rejected with status {}: {}",
                maze_path,
                status,
                text
            ));
        }

        Ok(response.json().await?)
    }

    /// POST the login name to `/mazebot/race/start`.
    pub async fn start_race(&self, login: &str) -> Result<RaceStart> {
        let url = format!("{}/mazebot/race/start", self.base_url);
        let request = RaceStartRequest { login };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "starting race failed with status {}: {}",
                status,
                text
            ));
        }

        Ok(response.json().await?)
    }
}
