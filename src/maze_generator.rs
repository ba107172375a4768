//! Map generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Random maze generator for local fixtures.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    const DIRECTIONS: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];
    const S_OPEN: char = ' ';
    const S_WALL: char = 'X';
    const S_START: char = 'A';
    const S_END: char = 'B';

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a simple imperfect maze (maze with loops) in the mazebot
    /// alphabet.
    ///
    /// The start and end markers land on carved squares, so the generated
    /// maze is always solvable.
    ///
    /// Inspired by https://github.com/Yassineelg/maze_runner/
    pub fn generate_maze(&mut self, height: usize, width: usize) -> Vec<Vec<char>> {
        let mut grid: Vec<Vec<char>> = (0..height)
            .map(|_| (0..width).map(|_| Self::S_WALL).collect())
            .collect();

        // Generate random starting position in an odd cell
        let start_x = 1 + self.random.gen_range(1..(width / 2 - 1)) * 2;
        let start_y = 1 + self.random.gen_range(1..(height / 2 - 1)) * 2;
        grid[start_y][start_x] = Self::S_OPEN;

        self.build_maze(&mut grid, start_x, start_y, width, height);

        // Drop the start marker in the first quarter of the grid and the
        // end marker in the last, both on carved squares.
        let mut a_pos = self.random.gen_range(0..(width * height) / 4);
        while grid[a_pos / width][a_pos % width] != Self::S_OPEN {
            a_pos += 1;
        }
        grid[a_pos / width][a_pos % width] = Self::S_START;

        let mut b_pos = self
            .random
            .gen_range((width * height * 3 / 4)..width * height);
        while grid[b_pos / width][b_pos % width] != Self::S_OPEN {
            b_pos -= 1;
        }
        grid[b_pos / width][b_pos % width] = Self::S_END;

        grid
    }

    /// Build maze recursively
    ///
    /// From current position, go into random directions. Carve out walls
    /// if there is wall behind the carved area (or at random, skip this
    /// check). This randomness allows creation of imperfect mazes.
    fn build_maze(
        &mut self,
        grid: &mut Vec<Vec<char>>,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) {
        let mut directions = Self::DIRECTIONS.to_vec();
        directions.shuffle(&mut self.random);

        for (dx, dy) in directions {
            let nx = (x as i32 + dx) as usize;
            let ny = (y as i32 + dy) as usize;

            if nx < width
                && ny < height
                && (grid[ny][nx] == Self::S_WALL || self.random.gen_bool(0.05))
            {
                // Remove wall between current cell and neighbor
                grid[(y as i32 + dy / 2) as usize][(x as i32 + dx / 2) as usize] = Self::S_OPEN;
                grid[ny][nx] = Self::S_OPEN;

                // Recurse to continue generating maze
                self.build_maze(grid, nx, ny, width, height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{maze_generator::MazeGenerator, Algorithm, Maze};

    #[test]
    fn generate_solvable_maze() {
        let mut gen = MazeGenerator::new(Some(0));
        let res = gen.generate_maze(15, 15);

        let text = res.iter().map(|row| row.iter().join("")).join("\n");

        // Every carved square is connected to every other, so a maze with
        // both markers on carved squares must solve.
        let maze = Maze::parse(&text).unwrap();
        let solution = maze.solve(Algorithm::FloodFill).unwrap();
        assert!(!solution.path.is_empty());
    }
}
