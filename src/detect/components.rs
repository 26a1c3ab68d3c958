//! Connected-component labeling of content pixels.
//!
//! Alternative to the projection strategy for sheets whose sprites do not
//! line up in rows and columns. Uses two-pass labeling with union-find over
//! 8-connected content pixels.

use std::collections::HashMap;

use crate::geometry::Rectangle;
use crate::raster::RasterImage;

use super::DetectedSprite;

/// Label 0 marks background
const BACKGROUND: u32 = 0;

/// Disjoint-set forest with path halving and union by rank.
#[derive(Debug, Default)]
pub struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a singleton set and return its id.
    pub fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        self.rank.push(0);
        id
    }

    /// Find the representative (root) of the set containing `i`.
    #[inline]
    pub fn find(&mut self, i: u32) -> u32 {
        let mut root = i;
        while self.parent[root as usize] != root {
            self.parent[root as usize] = self.parent[self.parent[root as usize] as usize];
            root = self.parent[root as usize];
        }
        root
    }

    /// Unite the sets containing `i` and `j`.
    #[inline]
    pub fn union(&mut self, i: u32, j: u32) {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i != root_j {
            match self.rank[root_i as usize].cmp(&self.rank[root_j as usize]) {
                std::cmp::Ordering::Less => self.parent[root_i as usize] = root_j,
                std::cmp::Ordering::Greater => self.parent[root_j as usize] = root_i,
                std::cmp::Ordering::Equal => {
                    self.parent[root_i as usize] = root_j;
                    self.rank[root_j as usize] += 1;
                }
            }
        }
    }
}

/// Running bounds of one component
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    pixels: u64,
}

impl Bounds {
    fn at(x: u32, y: u32) -> Self {
        Self { min_x: x, min_y: y, max_x: x, max_y: y, pixels: 1 }
    }

    fn extend(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.pixels += 1;
    }

    fn rect(&self) -> Rectangle {
        Rectangle::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x + 1,
            self.max_y - self.min_y + 1,
        )
    }
}

/// Bounding box of every 8-connected group of pixels with alpha above
/// `threshold`, ordered top-to-bottom then left-to-right.
pub fn detect_components(image: &RasterImage, threshold: u8) -> Vec<DetectedSprite> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut labels = vec![BACKGROUND; width * height];
    let mut sets = UnionFind::new();
    // Slot 0 is the background label
    sets.make_set();

    // First pass: provisional labels from the already-visited neighbors
    // (west, north-west, north, north-east)
    for y in 0..height {
        for x in 0..width {
            if image.alpha_at(x as u32, y as u32) <= threshold {
                continue;
            }

            let mut neighbors = [BACKGROUND; 4];
            if x > 0 {
                neighbors[0] = labels[y * width + x - 1];
            }
            if y > 0 {
                let above = (y - 1) * width;
                if x > 0 {
                    neighbors[1] = labels[above + x - 1];
                }
                neighbors[2] = labels[above + x];
                if x + 1 < width {
                    neighbors[3] = labels[above + x + 1];
                }
            }

            let mut label = BACKGROUND;
            for &n in neighbors.iter().filter(|&&n| n != BACKGROUND) {
                if label == BACKGROUND {
                    label = n;
                } else {
                    sets.union(label, n);
                }
            }
            if label == BACKGROUND {
                label = sets.make_set();
            }
            labels[y * width + x] = label;
        }
    }

    // Second pass: accumulate bounds per root
    let mut bounds: HashMap<u32, Bounds> = HashMap::new();
    for y in 0..height {
        for x in 0..width {
            let label = labels[y * width + x];
            if label == BACKGROUND {
                continue;
            }
            let root = sets.find(label);
            bounds
                .entry(root)
                .and_modify(|b| b.extend(x as u32, y as u32))
                .or_insert_with(|| Bounds::at(x as u32, y as u32));
        }
    }

    let mut components: Vec<Bounds> = bounds.into_values().collect();
    components.sort_by_key(|b| (b.min_y, b.min_x, b.max_y, b.max_x));

    components
        .into_iter()
        .map(|b| DetectedSprite::from_component(b.rect(), b.pixels))
        .collect()
}
