use std::collections::BTreeMap;

use crate::{
    foundation::core::{BoxId, Item, ObserverId, Size},
    foundation::error::{StackError, StackResult},
    host::{Capabilities, ViewLayer, memory::MemoryHost},
    layout::config::StackConfig,
    layout::constraint::Constraint,
    layout::spacer::ScaffoldRole,
    stack::container::StackContainer,
};

/// A stack described as data: configuration plus the boxes to arrange, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Stack configuration.
    #[serde(default)]
    pub config: StackConfig,
    /// Host features to assume.
    #[serde(default)]
    pub capabilities: Capabilities,
    /// Arranged boxes, first to last.
    pub boxes: Vec<SceneBox>,
}

/// One arranged box of a [`Scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneBox {
    /// Unique display name.
    pub name: String,
    /// Intrinsic width.
    #[serde(default)]
    pub width: f64,
    /// Intrinsic height.
    #[serde(default)]
    pub height: f64,
    /// Initial hidden flag.
    #[serde(default)]
    pub hidden: bool,
}

/// Outcome of laying a [`Scene`] out on a [`MemoryHost`].
#[derive(Clone, Debug)]
pub struct SceneLayout {
    /// Installed constraints, in installation order.
    pub constraints: Vec<Constraint>,
    /// Scaffold boxes the container created.
    pub scaffold: Vec<(BoxId, ScaffoldRole)>,
    /// Number of arranged boxes that are not hidden.
    pub visible: usize,
    names: BTreeMap<BoxId, String>,
}

impl Scene {
    /// Parse and validate a scene.
    pub fn from_json(s: &str) -> StackResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check the configuration, box names and sizes.
    pub fn validate(&self) -> StackResult<()> {
        self.config.validate()?;
        let mut seen = std::collections::BTreeSet::new();
        for b in &self.boxes {
            if b.name.trim().is_empty() {
                return Err(StackError::validation("box name must be non-empty"));
            }
            if !seen.insert(b.name.as_str()) {
                return Err(StackError::validation(format!(
                    "duplicate box name '{}'",
                    b.name
                )));
            }
            for (field, value) in [("width", b.width), ("height", b.height)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(StackError::validation(format!(
                        "box '{}' {field} must be finite and >= 0",
                        b.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Arrange every box in a fresh container and return what it installed.
    #[tracing::instrument(skip_all, fields(boxes = self.boxes.len()))]
    pub fn layout(&self) -> StackResult<SceneLayout> {
        self.validate()?;
        let mut host = MemoryHost::new();
        let mut container =
            StackContainer::with_config(ObserverId(0), self.capabilities, self.config)?;
        if self.capabilities.native_layout_margins {
            container.set_layout_margins(&mut host, self.config.layout_margins)?;
        }

        let mut names = BTreeMap::new();
        for b in &self.boxes {
            let id = host.add_box(Size::new(b.width, b.height));
            host.set_hidden(id, b.hidden);
            container.append(&mut host, id)?;
            names.insert(id, b.name.clone());
        }
        container.layout_if_needed(&mut host);

        let visible = container
            .arranged()
            .iter()
            .filter(|&&id| !container.is_hidden(&host, id))
            .count();
        let scaffold: Vec<(BoxId, ScaffoldRole)> = host.spacers().collect();
        for (id, role) in &scaffold {
            names.insert(*id, format!("{}#{}", role.identifier(), id.0));
        }

        Ok(SceneLayout {
            constraints: host.constraints().to_vec(),
            scaffold,
            visible,
            names,
        })
    }
}

impl SceneLayout {
    /// Display name of `item`: the scene name for arranged boxes, the role for scaffold boxes.
    pub fn label(&self, item: Item) -> String {
        match item {
            Item::Container => "container".to_string(),
            Item::Box(id) => self
                .names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
        }
    }

    /// One line per constraint using scene names.
    pub fn lines(&self) -> Vec<String> {
        self.constraints
            .iter()
            .map(|c| c.describe(|item| self.label(item)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
