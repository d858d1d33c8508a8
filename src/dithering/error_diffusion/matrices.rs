/// One neighbor of a diffusion kernel: (dx, dy, weight). dy is never
/// negative, so error only ever lands on not-yet-visited pixels of a
/// top-to-bottom, left-to-right scan.
pub type KernelEntry = (isize, isize, f64);

/// Classic Floyd-Steinberg kernel; the four weights sum to 16/16.
pub const FLOYD_STEINBERG: [KernelEntry; 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Atkinson kernel: six equal shares of 1/8, so only 6/8 of the error is
/// redistributed. The lost 2/8 is intentional and load-bearing for the
/// algorithm's washed-out highlights.
pub const ATKINSON: [KernelEntry; 6] = [
    (1, 0, 1.0 / 8.0),
    (2, 0, 1.0 / 8.0),
    (-1, 1, 1.0 / 8.0),
    (0, 1, 1.0 / 8.0),
    (1, 1, 1.0 / 8.0),
    (0, 2, 1.0 / 8.0),
];
