use super::{Fragment, Group, GroupOrigin, GroupingConfig, MinSize};
use tracing::debug;

/// Fragments bucketed by length.
///
/// Slot `i` holds a stack of fragments with exactly `i` members, for
/// `0 <= i < target_size`.
#[derive(Debug, Clone)]
pub struct SizeQueueTable<T> {
    classes: Vec<Vec<Fragment<T>>>,
}

impl<T> SizeQueueTable<T> {
    pub fn new(target_size: usize) -> Self {
        Self {
            classes: (0..target_size).map(|_| Vec::new()).collect(),
        }
    }

    pub fn target_size(&self) -> usize {
        self.classes.len()
    }

    /// Push a fragment onto its size class. Callers keep `len < target_size`.
    pub fn push(&mut self, fragment: Fragment<T>) {
        let len = fragment.len();
        debug_assert!(len < self.classes.len());
        self.classes[len].push(fragment);
    }

    /// Pop the most recently pushed fragment of exactly `len` members
    pub fn pop(&mut self, len: usize) -> Option<Fragment<T>> {
        self.classes.get_mut(len).and_then(Vec::pop)
    }

    pub fn has(&self, len: usize) -> bool {
        self.classes.get(len).is_some_and(|class| !class.is_empty())
    }

    /// Number of fragments waiting in size class `len`
    pub fn class_len(&self, len: usize) -> usize {
        self.classes.get(len).map_or(0, Vec::len)
    }

    pub fn fragment_count(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    pub fn member_count(&self) -> usize {
        self.classes
            .iter()
            .flat_map(|class| class.iter())
            .map(Fragment::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.iter().all(Vec::is_empty)
    }

    /// Remove every fragment, shortest class first, stack order within a class
    fn drain_ascending(&mut self) -> Vec<Fragment<T>> {
        let mut drained = Vec::with_capacity(self.fragment_count());
        for class in &mut self.classes {
            while let Some(fragment) = class.pop() {
                drained.push(fragment);
            }
        }
        drained
    }
}

/// Pairs remainder fragments whose sizes complement each other and merges
/// whatever is left once a stratum has been fully chunked.
///
/// One distributor serves one stratum run; it is consumed by
/// [`GroupDistributor::combine_remainders`].
#[derive(Debug)]
pub struct GroupDistributor<T> {
    config: GroupingConfig,
    table: SizeQueueTable<T>,
    complete: Vec<Group<T>>,
}

impl<T> GroupDistributor<T> {
    pub fn new(config: GroupingConfig) -> Self {
        Self {
            table: SizeQueueTable::new(config.target_size),
            config,
            complete: Vec::new(),
        }
    }

    /// Fragments still waiting for a partner
    pub fn pending(&self) -> &SizeQueueTable<T> {
        &self.table
    }

    /// Groups finalized so far
    pub fn completed(&self) -> &[Group<T>] {
        &self.complete
    }

    /// Offer a fragment for exact-sum pairing.
    ///
    /// If a waiting fragment has exactly the missing number of members, the
    /// two become a full group (waiting fragment first). Otherwise the
    /// fragment waits in its own size class. Fragments at or above capacity
    /// are finalized unchanged.
    pub fn enqueue(&mut self, fragment: Fragment<T>) {
        let len = fragment.len();
        let target = self.config.target_size;

        if len == 0 {
            return;
        }
        if len >= target {
            self.finish(fragment, GroupOrigin::WholeUnit);
            return;
        }

        match self.table.pop(target - len) {
            Some(mut partner) => {
                partner.append(fragment);
                debug!(members = partner.len(), "paired complementary fragments");
                self.finish(partner, GroupOrigin::ComplementPair);
            }
            None => self.table.push(fragment),
        }
    }

    /// Drain every waiting fragment into groups and return all groups this
    /// distributor produced, in emission order.
    pub fn combine_remainders(mut self) -> Vec<Group<T>> {
        debug!(
            fragments = self.table.fragment_count(),
            members = self.table.member_count(),
            min_size = %self.config.min_size,
            "combining remainders"
        );

        match self.config.min_size {
            MinSize::MergeAll => self.dump_remainders(GroupOrigin::MergeAll),
            MinSize::AtLeast(0) => {
                for fragment in self.table.drain_ascending() {
                    self.finish(fragment, GroupOrigin::PerFragment);
                }
            }
            MinSize::AtLeast(min) => self.merge_largest_first(min),
        }

        self.complete
    }

    /// Largest-first greedy fill, then a forced drain of whatever is left
    fn merge_largest_first(&mut self, min: usize) {
        let target = self.config.target_size;
        let mut buffer = Fragment::default();

        for len in (1..target).rev() {
            while self.table.has(len) {
                while buffer.len() + len < target {
                    match self.table.pop(len) {
                        Some(fragment) => buffer.append(fragment),
                        None => break,
                    }
                }

                self.top_up(&mut buffer);

                if buffer.len() >= min || self.table.has(len) {
                    self.finish(std::mem::take(&mut buffer), GroupOrigin::Merged);
                }
            }
        }

        if !buffer.is_empty() {
            debug!(members = buffer.len(), "requeueing underfilled buffer");
            self.enqueue(buffer);
        }

        self.dump_remainders(GroupOrigin::Forced);
    }

    /// Fill the buffer's spare capacity, preferring the largest fragment that
    /// still fits.
    fn top_up(&mut self, buffer: &mut Fragment<T>) {
        let target = self.config.target_size;
        let mut wanted = target.saturating_sub(buffer.len());

        while wanted > 0 {
            match self.table.pop(wanted) {
                Some(fragment) => {
                    buffer.append(fragment);
                    wanted = wanted.min(target - buffer.len());
                }
                None => wanted -= 1,
            }
        }
    }

    /// Concatenate every waiting fragment into one group
    fn dump_remainders(&mut self, origin: GroupOrigin) {
        let mut merged = Fragment::default();
        for fragment in self.table.drain_ascending() {
            merged.append(fragment);
        }
        self.finish(merged, origin);
    }

    fn finish(&mut self, fragment: Fragment<T>, origin: GroupOrigin) {
        if fragment.is_empty() {
            return;
        }
        self.complete.push(Group::new(fragment.into_members(), origin));
    }
}
