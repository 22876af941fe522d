// A fixed-capacity ring used once per traffic direction (submissions, completions)

/// An opaque ring position handed out by [`Ring::try_reserve`] and
/// [`Ring::try_consume`].
///
/// It can only be turned back into a slot through the ring that issued it,
/// so callers never see a raw storage index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub(crate) u32);

impl Position {
    /// The monotonic cursor value (wraps in the 32-bit space).
    #[inline]
    pub fn sequence(self) -> u32 {
        self.0
    }
}

/// A fixed-capacity circular buffer addressed by two monotonically
/// increasing cursors.
///
/// ### Cursor Design:
/// - **Producer (reserve)**: takes `tail` and advances it, but only while
///   `tail - head < capacity`.
/// - **Consumer (consume)**: takes `head` and advances it, but only while
///   `head != tail`.
/// - Both cursors are `u32` and wrap; all distances use wrapping
///   subtraction, so `tail - head` stays correct across the wrap.
/// - A position `p` lives at storage index `p & mask`.
///
/// The ring has no interior synchronization. Each direction keeps it behind
/// one mutex, and reservation and slot fill happen under that same guard, so
/// publication is implicit and the consumer always sees a gap-free prefix.
pub struct Ring<T> {
    /// Consumer cursor.
    pub(crate) head: u32,

    /// Producer cursor.
    pub(crate) tail: u32,

    /// Number of slots (power of two).
    pub(crate) capacity: u32,

    /// `capacity - 1`, for wrapping a cursor onto the slot table.
    pub(crate) mask: u32,

    /// Slot table, allocated once.
    pub(crate) slots: Box<[T]>,
}
