//! Live debug controls.
//!
//! Components register folders of numeric controls; the panel turns keyboard
//! input into `ControlEdit`s that the owning component applies to its values.
//!
//! Keys:
//! - `Tab` / `Shift+Tab`: next / previous control
//! - `ArrowUp` / `ArrowDown`: one step up / down (`Shift`: ten steps)

mod control;

pub use control::{ControlEdit, ControlSpec};

use crate::input::{InputFrame, Key, Modifiers};

/// Handle to a folder registered on a `DebugPanel`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FolderId(usize);

/// Named group of controls.
#[derive(Debug, Clone)]
pub struct DebugFolder {
    title: String,
    controls: Vec<(&'static str, ControlSpec)>,
}

impl DebugFolder {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Registers a control for `field`.
    pub fn add_control(&mut self, field: &'static str, spec: ControlSpec) -> &mut Self {
        self.controls.push((field, spec));
        self
    }

    pub fn controls(&self) -> &[(&'static str, ControlSpec)] {
        &self.controls
    }
}

#[derive(Debug, Default)]
pub struct DebugPanel {
    folders: Vec<DebugFolder>,
    /// Index into the flattened control list.
    selected: usize,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&mut self, title: impl Into<String>) -> FolderId {
        let id = FolderId(self.folders.len());
        self.folders.push(DebugFolder {
            title: title.into(),
            controls: Vec::new(),
        });
        id
    }

    pub fn folder(&self, id: FolderId) -> Option<&DebugFolder> {
        self.folders.get(id.0)
    }

    pub fn folder_mut(&mut self, id: FolderId) -> Option<&mut DebugFolder> {
        self.folders.get_mut(id.0)
    }

    pub fn control_count(&self) -> usize {
        self.folders.iter().map(|f| f.controls.len()).sum()
    }

    /// The currently selected control, if any are registered.
    pub fn selected(&self) -> Option<(FolderId, &'static str, ControlSpec)> {
        self.controls().nth(self.selected)
    }

    /// Applies this frame's key presses to the selection and returns the edit
    /// requested by the arrow keys, if any.
    pub fn handle_input(&mut self, input: &InputFrame, modifiers: Modifiers) -> Option<ControlEdit> {
        let count = self.control_count();
        if count == 0 {
            return None;
        }

        if input.pressed(Key::Tab) {
            self.selected = if modifiers.shift {
                (self.selected + count - 1) % count
            } else {
                (self.selected + 1) % count
            };
            if let Some((folder, field, spec)) = self.selected() {
                log::info!(
                    "debug: selected {}/{}",
                    self.folders[folder.0].title,
                    spec.label.unwrap_or(field)
                );
            }
        }

        let mut steps = 0;
        if input.pressed(Key::ArrowUp) {
            steps += 1;
        }
        if input.pressed(Key::ArrowDown) {
            steps -= 1;
        }
        if steps == 0 {
            return None;
        }
        if modifiers.shift {
            steps *= 10;
        }

        let (folder, field, spec) = self.selected()?;
        Some(ControlEdit {
            folder,
            field,
            spec,
            steps,
        })
    }

    fn controls(&self) -> impl Iterator<Item = (FolderId, &'static str, ControlSpec)> + '_ {
        self.folders.iter().enumerate().flat_map(|(i, f)| {
            f.controls
                .iter()
                .map(move |&(field, spec)| (FolderId(i), field, spec))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> (DebugPanel, FolderId) {
        let mut panel = DebugPanel::new();
        let id = panel.add_folder("sphere");
        panel
            .folder_mut(id)
            .unwrap()
            .add_control("a", ControlSpec::new(0.0, 1.0, 0.1))
            .add_control("b", ControlSpec::new(0.0, 10.0, 1.0).labeled("B"));
        (panel, id)
    }

    fn frame(keys: &[Key]) -> InputFrame {
        let mut f = InputFrame::default();
        f.keys_pressed.extend(keys.iter().copied());
        f
    }

    #[test]
    fn tab_cycles_selection_both_ways() {
        let (mut panel, _) = panel();
        assert_eq!(panel.selected().map(|s| s.1), Some("a"));

        panel.handle_input(&frame(&[Key::Tab]), Modifiers::default());
        assert_eq!(panel.selected().map(|s| s.1), Some("b"));

        panel.handle_input(&frame(&[Key::Tab]), Modifiers::default());
        assert_eq!(panel.selected().map(|s| s.1), Some("a"));

        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        panel.handle_input(&frame(&[Key::Tab]), shift);
        assert_eq!(panel.selected().map(|s| s.1), Some("b"));
    }

    #[test]
    fn arrows_produce_edits() {
        let (mut panel, id) = panel();
        let edit = panel
            .handle_input(&frame(&[Key::ArrowUp]), Modifiers::default())
            .unwrap();
        assert_eq!((edit.folder, edit.field, edit.steps), (id, "a", 1));
        assert!((edit.apply(0.5) - 0.6).abs() < 1e-6);

        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        let edit = panel.handle_input(&frame(&[Key::ArrowDown]), shift).unwrap();
        assert_eq!(edit.steps, -10);
        assert_eq!(edit.apply(0.5), 0.0);
    }

    #[test]
    fn no_edit_without_arrows_or_controls() {
        let (mut panel, _) = panel();
        assert!(panel.handle_input(&frame(&[]), Modifiers::default()).is_none());

        let mut empty = DebugPanel::new();
        assert!(empty.handle_input(&frame(&[Key::ArrowUp]), Modifiers::default()).is_none());
    }
}
