use crate::components::{Color, Mesh, Visibility};
use crate::entity::NodeId;
use foundation::handles::Handle;

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneNode {
    pub mesh: Mesh,
    pub visibility: Visibility,
}

/// Flat scene graph root: a background color plus mesh nodes.
///
/// Node slots are reused after removal; each reuse bumps the slot generation
/// so a [`NodeId`] held past its node's removal resolves to nothing.
#[derive(Debug)]
pub struct SceneGraph {
    background: Color,
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl SceneGraph {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn add(&mut self, mesh: Mesh) -> NodeId {
        let node = SceneNode {
            mesh,
            visibility: Visibility::Visible,
        };
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            return NodeId(Handle::new(index, slot.generation));
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId(Handle::new(index, 0))
    }

    /// Detaches a node, returning its mesh so the caller can release the
    /// backing GPU resources.
    pub fn remove(&mut self, id: NodeId) -> Option<Mesh> {
        let slot = self.slot_mut(id)?;
        let node = slot.node.take()?;
        self.free.push(id.index());
        self.len -= 1;
        Some(node.mesh)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) -> bool {
        match self.slot_mut(id).and_then(|s| s.node.as_mut()) {
            Some(node) => {
                node.visibility = visibility;
                true
            }
            None => false,
        }
    }

    /// Visible meshes in slot order.
    pub fn visible_meshes(&self) -> Vec<(NodeId, Mesh)> {
        let mut out = Vec::new();
        for (idx, slot) in self.slots.iter().enumerate() {
            let Some(node) = &slot.node else { continue };
            if !node.visibility.is_visible() {
                continue;
            }
            out.push((NodeId(Handle::new(idx as u32, slot.generation)), node.mesh));
        }
        out
    }

    /// Removes every node and returns their meshes.
    pub fn clear(&mut self) -> Vec<Mesh> {
        let mut out = Vec::with_capacity(self.len);
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if let Some(node) = slot.node.take() {
                self.free.push(idx as u32);
                out.push(node.mesh);
            }
        }
        self.len = 0;
        out
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::SceneGraph;
    use crate::components::{Color, Material, MaterialId, Mesh, MeshId, Visibility};

    fn mesh(n: u64) -> Mesh {
        Mesh::new(MeshId(n), MaterialId(n), Material::basic(Color::WHITE))
    }

    #[test]
    fn add_and_collect_meshes() {
        let mut graph = SceneGraph::new(Color::from_hex(0x222222));
        let id = graph.add(mesh(1));

        let meshes = graph.visible_meshes();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].0, id);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn hidden_nodes_are_filtered() {
        let mut graph = SceneGraph::new(Color::WHITE);
        let id = graph.add(mesh(1));
        assert!(graph.set_visibility(id, Visibility::Hidden));
        assert!(graph.visible_meshes().is_empty());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn stale_ids_do_not_alias_reused_slots() {
        let mut graph = SceneGraph::new(Color::WHITE);
        let first = graph.add(mesh(1));
        assert_eq!(graph.remove(first), Some(mesh(1)));
        assert_eq!(graph.remove(first), None);

        let second = graph.add(mesh(2));
        assert_eq!(first.index(), second.index());
        assert!(!graph.contains(first));
        assert!(graph.contains(second));
        assert_eq!(graph.remove(first), None);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn clear_returns_all_meshes() {
        let mut graph = SceneGraph::new(Color::WHITE);
        graph.add(mesh(1));
        graph.add(mesh(2));
        let removed = graph.clear();
        assert_eq!(removed.len(), 2);
        assert!(graph.is_empty());
        assert!(graph.visible_meshes().is_empty());
    }
}
