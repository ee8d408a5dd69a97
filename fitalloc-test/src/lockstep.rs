//! A test-runner for detecting data-races and race-conditions.

use std::{
    sync::{Arc, Barrier},
    thread::{self, JoinHandle},
};

type Step<Global, Local> = Box<dyn FnMut(&Global, &mut Local) + Send + 'static>;

/// Lockstep is a test-runner for writing tests specializing in flushing out data-races
/// and race-conditions.
///
/// Lockstep is a multi-thread coordinator running user-specified steps across multiple
/// threads of execution:
///
/// -   A Global state is shared across all threads.
/// -   N instances of a Local state are each dedicated to a single thread.
/// -   S steps run on each thread; all threads rendez-vous on a barrier before each
///     step, so that the step starts as simultaneously as possible everywhere.
///
/// Constructing a `Lockstep` is done through a `LockstepBuilder`.
pub struct Lockstep<Global, Local> {
    global: Arc<Global>,
    threads: Vec<JoinHandle<Local>>,
}

impl<Global, Local> Lockstep<Global, Local> {
    /// Returns a reference to the Global state.
    ///
    /// #   Warning
    ///
    /// Access is provided _without_ joining the threads first.
    pub fn global(&self) -> &Global { &*self.global }

    /// Joins the threads, returning the Global state and the Local states, in thread
    /// order.
    ///
    /// #   Panics
    ///
    /// -   If any of the threads being joined panicked; all threads are joined before
    ///     panicking.
    pub fn join(self) -> (Global, Vec<Local>) {
        //  First join _all_ threads, then inspect the results, so that a panicking
        //  thread does not leave the others detached.
        let results: Vec<_> = self.threads.into_iter()
            .map(|handle| handle.join())
            .collect();

        let locals: Vec<_> = results.into_iter()
            .map(|result| result.expect("Thread panicked"))
            .collect();

        let global = match Arc::try_unwrap(self.global) {
            Ok(global) => global,
            Err(_) => panic!("Global state still shared after joining all threads"),
        };

        (global, locals)
    }
}

/// LockstepBuilder, a builder for a `Lockstep` instance.
///
/// #   Warning
///
/// A step that panics leaves the other threads waiting on the barrier forever; steps
/// should not be able to fail for reasons other than the bug being hunted.
///
/// #   Example
///
/// A simple demonstration of constructing an instance of `Lockstep`.
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use fitalloc_test::LockstepBuilder;
///
/// let mut builder = LockstepBuilder::new(AtomicUsize::new(0), vec!(1usize, 10));
///
/// builder.add_step(|| |global: &AtomicUsize, local: &mut usize| {
///     global.fetch_add(*local, Ordering::Relaxed);
/// });
///
/// let (global, locals) = builder.launch(2).join();
///
/// assert_eq!(22, global.load(Ordering::Relaxed));
/// assert_eq!(vec!(1usize, 10), locals);
/// ```
pub struct LockstepBuilder<Global, Local> {
    global: Arc<Global>,
    locals: Vec<Local>,
    steps: Vec<Vec<Step<Global, Local>>>,
    barrier: Arc<Barrier>,
}

impl<Global, Local> LockstepBuilder<Global, Local>
    where
        Global: Send + Sync + 'static,
        Local: Send + 'static,
{
    /// Creates a new instance of LockstepBuilder, with one thread per Local instance.
    pub fn new(global: Global, locals: Vec<Local>) -> Self {
        assert!(!locals.is_empty(), "Cannot run a lockstep test without a thread");

        let global = Arc::new(global);
        let steps = {
            let mut steps = vec!();
            steps.resize_with(locals.len(), || vec!());
            steps
        };
        let barrier = Arc::new(Barrier::new(locals.len()));

        Self { global, locals, steps, barrier }
    }

    /// Adds a step on each thread.
    ///
    /// The step is created by invoking `factory` for each thread.
    pub fn add_step<Factory, S>(&mut self, mut factory: Factory)
        where
            Factory: FnMut() -> S,
            S: FnMut(&Global, &mut Local) + Send + 'static,
    {
        for serie in &mut self.steps {
            let barrier = self.barrier.clone();
            let mut step = factory();

            serie.push(Box::new(move |global: &Global, local: &mut Local| {
                barrier.wait();

                step(global, local);
            }));
        }
    }

    /// Creates the Lockstep instance, which will run each serie of steps `iterations`
    /// times.
    ///
    /// The threads start immediately.
    pub fn launch(self, iterations: usize) -> Lockstep<Global, Local> {
        assert!(!self.steps[0].is_empty(), "Cannot run a lockstep test without a step");

        let mut threads = vec!();

        for (mut local, mut serie) in self.locals.into_iter().zip(self.steps.into_iter()) {
            let global = self.global.clone();

            threads.push(thread::spawn(move || {
                let global = &*global;

                for _ in 0..iterations {
                    for step in &mut serie {
                        step(global, &mut local);
                    }
                }

                local
            }));
        }

        Lockstep { global: self.global, threads }
    }
}
