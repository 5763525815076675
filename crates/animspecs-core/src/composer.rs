//! Composer, node applier, and composition driver.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::rc::Rc;

use crate::runtime::{Runtime, RuntimeHandle};
use crate::slot_table::{Owned, SlotTable};
use crate::state::MutableState;

/// Positional group key derived from a call-site.
pub type Key = u64;
/// Stable identity of an emitted node within a composition.
pub type NodeId = usize;

/// Hashes a call-site into a group [`Key`].
///
/// Seeds are fixed so keys are stable for the life of the process.
pub fn location_key(file: &str, line: u32, column: u32) -> Key {
    let mut hasher = ahash::RandomState::with_seeds(1, 2, 3, 4).build_hasher();
    file.hash(&mut hasher);
    line.hash(&mut hasher);
    column.hash(&mut hasher);
    hasher.finish()
}

/// Errors surfaced when addressing nodes through the applier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeError {
    /// The node was removed or never existed.
    Missing { id: NodeId },
    /// The node exists but is not of the requested concrete type.
    TypeMismatch { id: NodeId },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node #{id} does not exist"),
            NodeError::TypeMismatch { id } => write!(f, "node #{id} has unexpected type"),
        }
    }
}

impl std::error::Error for NodeError {}

/// A node emitted into the applier by composition.
///
/// UI crates define one concrete node type and downcast through `as_any`;
/// the runtime itself never inspects node internals.
pub trait Node: Any {
    /// Called once after the node is first inserted.
    fn mount(&mut self) {}

    /// Called when composition revisits an existing node.
    fn update(&mut self) {}

    /// Advances time-driven state by `dt` seconds. Returns true while the
    /// node still needs frames.
    fn tick(&mut self, _dt: f32) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl std::fmt::Debug for dyn Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Node")
    }
}

/// In-memory node store addressed by [`NodeId`].
pub struct MemoryApplier {
    nodes: Vec<Option<Box<dyn Node>>>,
}

impl MemoryApplier {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn create(&mut self, node: Box<dyn Node>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(node));
        id
    }

    pub fn get(&self, id: NodeId) -> Result<&dyn Node, NodeError> {
        self.nodes
            .get(id)
            .and_then(|slot| slot.as_deref())
            .ok_or(NodeError::Missing { id })
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut (dyn Node + 'static), NodeError> {
        self.nodes
            .get_mut(id)
            .and_then(|slot| slot.as_deref_mut())
            .ok_or(NodeError::Missing { id })
    }

    /// Runs `f` against the node downcast to `T`.
    pub fn with_node<T: Node, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, NodeError> {
        let node = self.get_mut(id)?;
        match node.as_any_mut().downcast_mut::<T>() {
            Some(typed) => Ok(f(typed)),
            None => Err(NodeError::TypeMismatch { id }),
        }
    }

    /// Ticks every node; true if any node still needs frames.
    pub fn tick_all(&mut self, dt: f32) -> bool {
        let mut active = false;
        for slot in self.nodes.iter_mut() {
            if let Some(node) = slot.as_deref_mut() {
                active |= node.tick(dt);
            }
        }
        active
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryApplier {
    fn default() -> Self {
        Self::new()
    }
}

type Command = Box<dyn FnOnce(&mut MemoryApplier)>;

struct ComposerCore {
    slots: RefCell<SlotTable>,
    applier: RefCell<MemoryApplier>,
    commands: RefCell<VecDeque<Command>>,
    runtime: Runtime,
}

/// Per-pass facade over the composer core.
#[derive(Clone)]
pub struct Composer {
    core: Rc<ComposerCore>,
}

impl Composer {
    pub fn with_group<R>(&self, key: Key, f: impl FnOnce(&Composer) -> R) -> R {
        self.core.slots.borrow_mut().start(key);
        let result = f(self);
        self.core.slots.borrow_mut().end();
        result
    }

    /// Emits a node, reusing the one recorded at the current slot position
    /// when present. New nodes are mounted through the command queue after
    /// the pass completes.
    pub fn emit_node<N: Node + 'static>(&self, init: impl FnOnce() -> N) -> NodeId {
        if let Some(id) = self.core.slots.borrow_mut().read_node() {
            if let Ok(node) = self.core.applier.borrow_mut().get_mut(id) {
                node.update();
            }
            return id;
        }

        let id = self.core.applier.borrow_mut().create(Box::new(init()));
        self.core.slots.borrow_mut().record_node(id);
        self.core
            .commands
            .borrow_mut()
            .push_back(Box::new(move |applier: &mut MemoryApplier| {
                if let Ok(node) = applier.get_mut(id) {
                    node.mount();
                }
            }));
        id
    }

    pub fn remember<T: 'static>(&self, init: impl FnOnce() -> T) -> Owned<T> {
        self.core.slots.borrow_mut().remember(init)
    }

    /// Mutates an emitted node in place during composition.
    pub fn update_node<T: Node, R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, NodeError> {
        self.core.applier.borrow_mut().with_node(id, f)
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.core.runtime.handle()
    }

    pub fn mutable_state_of<T: Clone + 'static>(&self, initial: T) -> MutableState<T> {
        MutableState::new(initial, self.runtime_handle())
    }
}

thread_local! {
    static COMPOSER_STACK: RefCell<Vec<Rc<ComposerCore>>> = const { RefCell::new(Vec::new()) };
}

/// Pops the composer scope on drop.
pub struct ComposerScopeGuard;

impl Drop for ComposerScopeGuard {
    fn drop(&mut self) {
        COMPOSER_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

fn enter_scope(core: Rc<ComposerCore>) -> ComposerScopeGuard {
    COMPOSER_STACK.with(|stack| stack.borrow_mut().push(core));
    ComposerScopeGuard
}

/// Enters a composition scope explicitly. Prefer [`Composition::render`].
pub fn enter_composer_scope(composer: &Composer) -> ComposerScopeGuard {
    enter_scope(Rc::clone(&composer.core))
}

/// Runs `f` with the innermost active composer.
///
/// Panics outside of composition; widget functions are only meaningful
/// during a render pass.
pub fn with_current_composer<R>(f: impl FnOnce(&Composer) -> R) -> R {
    COMPOSER_STACK.with(|stack| {
        let core = stack
            .borrow()
            .last()
            .expect("with_current_composer called outside of composition")
            .clone();
        f(&Composer { core })
    })
}

/// Owns the slot table and applier across frames and drives render passes.
pub struct Composition {
    core: Rc<ComposerCore>,
    runtime: Runtime,
    root: Option<NodeId>,
    needs_frame: bool,
}

impl Composition {
    pub fn with_runtime(applier: MemoryApplier, runtime: Runtime) -> Self {
        Self {
            core: Rc::new(ComposerCore {
                slots: RefCell::new(SlotTable::new()),
                applier: RefCell::new(applier),
                commands: RefCell::new(VecDeque::new()),
                runtime: runtime.clone(),
            }),
            runtime,
            root: None,
            needs_frame: false,
        }
    }

    /// Runs one composition pass and flushes mount commands.
    pub fn render(
        &mut self,
        root_key: Key,
        content: &mut dyn FnMut() -> NodeId,
    ) -> Result<(), NodeError> {
        self.core.slots.borrow_mut().reset();

        let guard = enter_scope(Rc::clone(&self.core));
        let root = with_current_composer(|composer| composer.with_group(root_key, |_| content()));
        drop(guard);

        loop {
            let command = self.core.commands.borrow_mut().pop_front();
            match command {
                Some(command) => command(&mut self.core.applier.borrow_mut()),
                None => break,
            }
        }
        self.root = Some(root);
        self.needs_frame = true;
        Ok(())
    }

    pub fn should_render(&self) -> bool {
        self.needs_frame
    }

    pub fn mark_rendered(&mut self) {
        self.needs_frame = false;
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn applier(&self) -> Ref<'_, MemoryApplier> {
        self.core.applier.borrow()
    }

    pub fn applier_mut(&self) -> RefMut<'_, MemoryApplier> {
        self.core.applier.borrow_mut()
    }

    pub fn node_count(&self) -> usize {
        self.core.applier.borrow().len()
    }
}
