use serde::Serialize;

/// One dot per slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    /// Accessible label, e.g. "Go to slide 3"
    pub label: String,
    pub active: bool,
}

/// Index-aligned indicator markers with exactly one active entry
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    items: Vec<Indicator>,
}

impl IndicatorSet {
    /// Build `count` indicators with the first one active
    pub fn new(count: usize) -> Self {
        let items = (0..count)
            .map(|index| Indicator {
                label: format!("Go to slide {}", index + 1),
                active: index == 0,
            })
            .collect();
        Self { items }
    }

    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(|i| i.label.clone()).collect()
    }

    /// Make `index` the only active indicator. Out-of-range indices are ignored.
    pub fn activate(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        for (i, item) in self.items.iter_mut().enumerate() {
            item.active = i == index;
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.items.iter().position(|i| i.active)
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|i| i.active).count()
    }
}
