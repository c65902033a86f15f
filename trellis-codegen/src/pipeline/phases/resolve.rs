//! Resolve phase - places exposed route groups in the host tree.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use eyre::{Result, eyre};
use trellis_core::join_segments;

use crate::{
    PackageMountIndex, ResolvedMount,
    mount::prefix_segments,
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Phase that resolves every package's `mount_routes`.
///
/// Packages are visited once, host first and then in directory order. A
/// package's mounts are applied under every prefix it is known to be
/// mounted at when its turn comes; the host starts at the root. Each
/// resolved mount records its prefix for the provider, so a provider
/// visited later fans its own mounts out under all of them.
///
/// Must run after `ScanPhase`.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Resolve mount declarations into host prefixes"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let registry = ctx
            .registry
            .as_ref()
            .ok_or_else(|| eyre!("registry not set - ResolvePhase must run after ScanPhase"))?;

        let mut index = PackageMountIndex::new();
        let mut mounts = Vec::new();
        let mut diagnostics = Vec::new();
        let mut unreached = Vec::new();

        for package in ctx.ordered_packages() {
            let groups = &package.routes().mount_routes;
            if groups.is_empty() {
                continue;
            }

            let consumer_prefixes = if index.contains(&package.id) {
                index.prefixes(&package.id)
            } else if package.id == ctx.host_id {
                vec![String::new()]
            } else {
                unreached.push(package.id.as_str());
                continue;
            };

            for group in groups {
                let base_route = group.base_route.as_deref().unwrap_or_default();

                for (key, slug) in &group.features {
                    let location = format!(
                        "{} mount_routes.{}.features.{}",
                        package.id, group.name, key
                    );

                    let Some(item) = registry.get(key) else {
                        diagnostics.push(
                            Diagnostic::warning(
                                self.name(),
                                format!("unknown registry key '{}'", key),
                            )
                            .at(location),
                        );
                        continue;
                    };

                    for consumer_prefix in &consumer_prefixes {
                        let prefix =
                            join_segments([consumer_prefix.as_str(), base_route, slug.as_str()]);
                        let mount_prefix = prefix_segments(&prefix);

                        if mount_prefix.iter().any(|s| s == "..") {
                            diagnostics.push(
                                Diagnostic::error(
                                    self.name(),
                                    format!(
                                        "mount prefix '{}' for '{}' leaves the output directory",
                                        prefix, key
                                    ),
                                )
                                .at(location.clone()),
                            );
                            continue;
                        }

                        mounts.push(ResolvedMount {
                            key: key.clone(),
                            provider_id: item.provider_id.clone(),
                            internal_path: item.internal_path.clone(),
                            route_files: item.route_files.clone(),
                            mount_prefix,
                        });
                        index.record(&item.provider_id, &prefix);
                    }
                }
            }
        }

        for package_id in unreached {
            let diagnostic = if index.contains(package_id) {
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "'{}' is mounted by a package resolved after it; its own mounts were not applied",
                        package_id
                    ),
                )
            } else {
                Diagnostic::info(
                    self.name(),
                    format!("'{}' is not mounted anywhere; its mounts were skipped", package_id),
                )
            };
            diagnostics.push(diagnostic.at(package_id));
        }

        for cycle in find_cycles(&mount_graph(ctx)) {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                format!("mount cycle: {}", cycle.join(" -> ")),
            ));
        }

        ctx.diagnostics.extend(diagnostics);
        ctx.mounts = Some(mounts);
        ctx.index = Some(index);
        Ok(())
    }
}

/// Consumer to provider edges for every mount of a registered key.
fn mount_graph(ctx: &GenerationContext) -> BTreeMap<String, BTreeSet<String>> {
    let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let Some(registry) = ctx.registry.as_ref() else {
        return graph;
    };

    for package in ctx.workspace.packages() {
        for group in &package.routes().mount_routes {
            for key in group.features.keys() {
                if let Some(item) = registry.get(key) {
                    // Self-mounts are plain placements, not cycles.
                    if item.provider_id != package.id {
                        graph
                            .entry(package.id.clone())
                            .or_default()
                            .insert(item.provider_id.clone());
                    }
                }
            }
        }
    }
    graph
}

/// One cycle per strongly connected component of the mount graph.
///
/// Components are found with Tarjan's algorithm. Each is reported as the
/// shortest cycle through its smallest member, starting and ending there.
fn find_cycles(graph: &BTreeMap<String, BTreeSet<String>>) -> Vec<Vec<String>> {
    let mut tarjan = Tarjan::new(graph);
    for node in graph.keys() {
        if !tarjan.visited(node) {
            tarjan.connect(node);
        }
    }

    let mut cycles: Vec<Vec<String>> = tarjan
        .components
        .iter()
        .filter(|c| c.len() > 1)
        .filter_map(|c| shortest_cycle(graph, c))
        .collect();
    cycles.sort();
    cycles
}

struct Tarjan<'a> {
    graph: &'a BTreeMap<String, BTreeSet<String>>,
    next_index: usize,
    index: BTreeMap<&'a str, usize>,
    lowlink: BTreeMap<&'a str, usize>,
    stack: Vec<&'a str>,
    on_stack: BTreeSet<&'a str>,
    components: Vec<BTreeSet<&'a str>>,
}

impl<'a> Tarjan<'a> {
    fn new(graph: &'a BTreeMap<String, BTreeSet<String>>) -> Self {
        Self {
            graph,
            next_index: 0,
            index: BTreeMap::new(),
            lowlink: BTreeMap::new(),
            stack: Vec::new(),
            on_stack: BTreeSet::new(),
            components: Vec::new(),
        }
    }

    fn visited(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    fn lower(&mut self, node: &'a str, candidate: usize) {
        let low = self.lowlink.entry(node).or_insert(candidate);
        *low = (*low).min(candidate);
    }

    fn connect(&mut self, node: &'a str) {
        self.index.insert(node, self.next_index);
        self.lowlink.insert(node, self.next_index);
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);

        let graph = self.graph;
        for next in graph.get(node).into_iter().flatten() {
            let next = next.as_str();
            if !self.visited(next) {
                self.connect(next);
                if let Some(&low) = self.lowlink.get(next) {
                    self.lower(node, low);
                }
            } else if self.on_stack.contains(next) {
                if let Some(&index) = self.index.get(next) {
                    self.lower(node, index);
                }
            }
        }

        if self.lowlink.get(node) == self.index.get(node) {
            let mut component = BTreeSet::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack.remove(member);
                component.insert(member);
                if member == node {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

/// Breadth-first search from the smallest member back to itself, staying
/// inside `component`.
fn shortest_cycle(
    graph: &BTreeMap<String, BTreeSet<String>>,
    component: &BTreeSet<&str>,
) -> Option<Vec<String>> {
    let start = *component.first()?;
    let mut parent: BTreeMap<&str, &str> = BTreeMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for next in graph.get(node).into_iter().flatten() {
            let next = next.as_str();
            if !component.contains(next) {
                continue;
            }
            if next == start {
                let mut path = vec![node];
                let mut current = node;
                while let Some(&prev) = parent.get(current) {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                path.push(start);
                return Some(path.into_iter().map(String::from).collect());
            }
            if !parent.contains_key(next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    None
}
