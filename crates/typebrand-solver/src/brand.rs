//! Deep branding: a canonical, comparable picture of a type.
//!
//! Branding records what the assignability relation forgets: which
//! properties are optional or readonly, where `any` and `unknown` sit,
//! every overload in order, a function's own properties. Two types are
//! strictly equal when their brands extend each other.
//!
//! Branding is a pure function of the type and the nominal registry, so
//! brands are cached per `TypeId`.

use crate::keys::{self, KeySet};
use crate::overloads::{self, OverloadInfo};
use crate::operations;
use crate::recursion::DepthCounter;
use crate::solver::Solver;
use crate::special::{self, SpecialKind};
use crate::structure::{self, members_of};
use crate::types::*;
use std::sync::Arc;
use tracing::{trace, warn};
use typebrand_common::{Atom, ensure_sufficient_stack};

#[derive(Clone, Debug, PartialEq)]
pub enum Brand {
    Never,
    Any,
    Unknown,
    /// A registry entry, compared by name only.
    Nominal { name: Arc<str> },
    /// Primitives, literals and branded primitives, compared natively.
    Primitive { value: TypeId },
    Constructor {
        params: Arc<Brand>,
        instance: Arc<Brand>,
    },
    Function {
        params: Arc<Brand>,
        ret: Arc<Brand>,
        this: Arc<Brand>,
        props: Arc<Brand>,
    },
    /// Several call signatures; compared pairwise in order.
    Overloads { overloads: Vec<Arc<Brand>> },
    Tuple {
        items: Vec<TupleItemBrand>,
        readonly: bool,
    },
    Array { items: Arc<Brand>, readonly: bool },
    Object(Box<ObjectBrand>),
    Union { members: Vec<Arc<Brand>> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleItemBrand {
    pub brand: Arc<Brand>,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectBrand {
    pub properties: Vec<(Atom, Arc<Brand>)>,
    pub readonly: KeySet,
    pub required: KeySet,
    pub optional: KeySet,
    pub string_index: Option<Arc<Brand>>,
    pub number_index: Option<Arc<Brand>>,
    /// `never` for everything that reaches the object step.
    pub constructor_params: Arc<Brand>,
}

impl ObjectBrand {
    pub fn property(&self, name: Atom) -> Option<&Arc<Brand>> {
        self.properties
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, brand)| brand)
    }
}

impl Brand {
    pub fn tag(&self) -> &'static str {
        match self {
            Brand::Never => "never",
            Brand::Any => "any",
            Brand::Unknown => "unknown",
            Brand::Nominal { .. } => "nominal",
            Brand::Primitive { .. } => "primitive",
            Brand::Constructor { .. } => "constructor",
            Brand::Function { .. } => "function",
            Brand::Overloads { .. } => "overloads",
            Brand::Tuple { .. } => "tuple",
            Brand::Array { .. } => "array",
            Brand::Object(_) => "object",
            Brand::Union { .. } => "union",
        }
    }
}

/// Brand `type_id` with the solver's nominal registry and depth limit.
pub fn deep_brand(solver: &Solver, type_id: TypeId) -> Arc<Brand> {
    Brander::new(solver).brand(type_id)
}

pub struct Brander<'a> {
    solver: &'a Solver,
    depth: DepthCounter,
    truncated: bool,
}

impl<'a> Brander<'a> {
    pub fn new(solver: &'a Solver) -> Self {
        Brander {
            solver,
            depth: DepthCounter::new(solver.options().brand_depth_limit),
            truncated: false,
        }
    }

    /// Whether the depth limit cut the walk short somewhere.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn brand(&mut self, type_id: TypeId) -> Arc<Brand> {
        if let Some(cached) = self.solver.cache().brand(type_id) {
            return cached;
        }
        if !self.depth.enter() {
            if !self.truncated {
                warn!(
                    type_id = type_id.0,
                    limit = self.depth.max_depth(),
                    "brand depth limit reached, treating the rest as unknown"
                );
            }
            self.truncated = true;
            return Arc::new(Brand::Unknown);
        }
        let brand = Arc::new(ensure_sufficient_stack(|| self.compute(type_id)));
        self.depth.leave();
        if !self.truncated {
            self.solver.cache().insert_brand(type_id, brand.clone());
        }
        brand
    }

    fn compute(&mut self, type_id: TypeId) -> Brand {
        let solver = self.solver;
        if let Some(kind) = special::special_kind(solver, type_id) {
            return match kind {
                SpecialKind::Never => Brand::Never,
                SpecialKind::Any => Brand::Any,
                SpecialKind::Unknown => Brand::Unknown,
            };
        }
        if let Some(name) = self.nominal_name(type_id) {
            return Brand::Nominal { name };
        }
        let interner = solver.interner();
        if let Some(TypeKey::Union(list_id)) = interner.lookup(type_id) {
            let members = interner.type_list(list_id);
            return Brand::Union {
                members: members.iter().map(|&m| self.brand(m)).collect(),
            };
        }
        if structure::is_primitive(solver, type_id) {
            return Brand::Primitive { value: type_id };
        }

        let apparent = structure::apparent_type(solver, type_id);
        if apparent != type_id {
            if let Some(TypeKey::Union(_)) = interner.lookup(apparent) {
                return self.compute(apparent);
            }
            if structure::is_primitive(solver, apparent) {
                return Brand::Primitive { value: apparent };
            }
        }

        let members = members_of(solver, apparent);
        if let Some(members) = &members {
            if !members.construct_signatures.is_empty() {
                return self.brand_constructor(apparent, members);
            }
            if !members.call_signatures.is_empty() {
                return self.brand_callable(apparent, members);
            }
        }

        if let Some((elements, readonly)) = structure::tuple_elements(solver, apparent) {
            let items = elements
                .iter()
                .map(|element| TupleItemBrand {
                    brand: self.brand(element.type_id),
                    optional: element.optional,
                    rest: element.rest,
                })
                .collect();
            return Brand::Tuple { items, readonly };
        }
        if let Some(element) = structure::array_element_type(solver, apparent) {
            return Brand::Array {
                items: self.brand(element),
                readonly: structure::is_readonly_array_like(solver, apparent),
            };
        }

        let Some(members) = members else {
            // Nothing structural left (e.g. an intersection of disjoint
            // object-less members); fall back to the native relation.
            trace!(type_id = type_id.0, "branding opaque type as primitive");
            return Brand::Primitive { value: type_id };
        };
        let properties = members
            .properties
            .iter()
            .map(|prop| (prop.name, self.brand(structure::read_type(solver, prop))))
            .collect();
        Brand::Object(Box::new(ObjectBrand {
            properties,
            readonly: keys::readonly_keys(solver, apparent),
            required: keys::required_keys(solver, apparent),
            optional: keys::optional_keys(solver, apparent),
            string_index: members.string_index.map(|index| self.brand(index.value_type)),
            number_index: members.number_index.map(|index| self.brand(index.value_type)),
            constructor_params: Arc::new(Brand::Never),
        }))
    }

    /// The registry entry `type_id` is mutually assignable with, when there
    /// is exactly one.
    fn nominal_name(&self, type_id: TypeId) -> Option<Arc<str>> {
        let mut found = None;
        for (name, entry) in self.solver.nominal_types().iter() {
            if self.solver.is_mutually_assignable(type_id, entry) {
                if found.is_some() {
                    return None;
                }
                found = Some(Arc::from(name));
            }
        }
        found
    }

    fn brand_constructor(&mut self, type_id: TypeId, members: &structure::Members) -> Brand {
        let solver = self.solver;
        let params = overloads::constructor_overload_parameters(solver, type_id);
        let instance = members
            .construct_signatures
            .last()
            .map_or(TypeId::UNKNOWN, |sig| sig.return_type);
        Brand::Constructor {
            params: self.brand(params),
            instance: self.brand(instance),
        }
    }

    fn brand_callable(&mut self, type_id: TypeId, members: &structure::Members) -> Brand {
        let solver = self.solver;
        let infos = overloads::overloads_info(solver, type_id);
        if let [info] = infos.as_slice() {
            let props = solver.interner().object(members.properties.clone());
            return Brand::Function {
                params: self.brand(info.parameters),
                ret: self.brand(info.return_type),
                this: self.brand(operations::this_parameter_type(solver, type_id)),
                props: self.brand(props),
            };
        }
        Brand::Overloads {
            overloads: infos
                .iter()
                .map(|info| Arc::new(self.brand_overload(info)))
                .collect(),
        }
    }

    fn brand_overload(&mut self, info: &OverloadInfo) -> Brand {
        Brand::Function {
            params: self.brand(info.parameters),
            ret: self.brand(info.return_type),
            this: Arc::new(Brand::Unknown),
            props: Arc::new(Brand::Never),
        }
    }
}

/// Structural extension between brands: does every value described by
/// `left` fit `right`?
pub fn brand_extends(solver: &Solver, left: &Brand, right: &Brand) -> bool {
    ensure_sufficient_stack(|| brand_extends_inner(solver, left, right))
}

fn brand_extends_inner(solver: &Solver, left: &Brand, right: &Brand) -> bool {
    if let Brand::Union { members } = left {
        return members.iter().all(|m| brand_extends(solver, m, right));
    }
    if let Brand::Union { members } = right {
        return members.iter().any(|m| brand_extends(solver, left, m));
    }
    match (left, right) {
        (Brand::Never, Brand::Never) | (Brand::Any, Brand::Any) => true,
        (Brand::Unknown, Brand::Unknown) => true,
        (Brand::Nominal { name: l }, Brand::Nominal { name: r }) => l == r,
        (Brand::Primitive { value: l }, Brand::Primitive { value: r }) => {
            solver.is_assignable(*l, *r)
        }
        (
            Brand::Constructor {
                params: lp,
                instance: li,
            },
            Brand::Constructor {
                params: rp,
                instance: ri,
            },
        ) => brand_extends(solver, lp, rp) && brand_extends(solver, li, ri),
        (
            Brand::Function {
                params: lp,
                ret: lr,
                this: lt,
                props: lo,
            },
            Brand::Function {
                params: rp,
                ret: rr,
                this: rt,
                props: ro,
            },
        ) => {
            brand_extends(solver, lp, rp)
                && brand_extends(solver, lr, rr)
                && brand_extends(solver, lt, rt)
                && brand_extends(solver, lo, ro)
        }
        (Brand::Overloads { overloads: l }, Brand::Overloads { overloads: r }) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| brand_extends(solver, a, b))
        }
        (
            Brand::Tuple {
                items: l,
                readonly: lr,
            },
            Brand::Tuple {
                items: r,
                readonly: rr,
            },
        ) => {
            lr == rr
                && l.len() == r.len()
                && l.iter().zip(r).all(|(a, b)| {
                    a.optional == b.optional
                        && a.rest == b.rest
                        && brand_extends(solver, &a.brand, &b.brand)
                })
        }
        (
            Brand::Array {
                items: l,
                readonly: lr,
            },
            Brand::Array {
                items: r,
                readonly: rr,
            },
        ) => lr == rr && brand_extends(solver, l, r),
        (Brand::Object(l), Brand::Object(r)) => object_extends(solver, l, r),
        _ => false,
    }
}

fn object_extends(solver: &Solver, left: &ObjectBrand, right: &ObjectBrand) -> bool {
    let properties_fit = right.properties.iter().all(|(name, r_brand)| {
        left.property(*name)
            .is_some_and(|l_brand| brand_extends(solver, l_brand, r_brand))
    });
    properties_fit
        && left.readonly.is_subset(&right.readonly)
        && left.required.is_subset(&right.required)
        && left.optional.is_subset(&right.optional)
        && optional_extends(solver, &left.string_index, &right.string_index)
        && optional_extends(solver, &left.number_index, &right.number_index)
        && brand_extends(solver, &left.constructor_params, &right.constructor_params)
}

fn optional_extends(solver: &Solver, left: &Option<Arc<Brand>>, right: &Option<Arc<Brand>>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => brand_extends(solver, l, r),
        _ => false,
    }
}

/// One-directional brand match: `left` fits `right` with extra properties
/// allowed and readonly ignored. `any`, `unknown` and `never` still only
/// match themselves, so a nested `any` is not hidden by the width rule.
/// Meant to run after the native relation has accepted the pair.
pub fn brand_matches(solver: &Solver, left: &Brand, right: &Brand) -> bool {
    ensure_sufficient_stack(|| brand_matches_inner(solver, left, right))
}

fn brand_matches_inner(solver: &Solver, left: &Brand, right: &Brand) -> bool {
    if let Brand::Union { members } = left {
        return members.iter().all(|m| brand_matches(solver, m, right));
    }
    if let Brand::Union { members } = right {
        return members.iter().any(|m| brand_matches(solver, left, m));
    }
    match (left, right) {
        (Brand::Never, Brand::Never) | (Brand::Any, Brand::Any) => true,
        (Brand::Unknown, Brand::Unknown) => true,
        (Brand::Nominal { name: l }, Brand::Nominal { name: r }) => l == r,
        (Brand::Primitive { value: l }, Brand::Primitive { value: r }) => {
            solver.is_assignable(*l, *r)
        }
        (
            Brand::Constructor {
                params: lp,
                instance: li,
            },
            Brand::Constructor {
                params: rp,
                instance: ri,
            },
        ) => brand_matches(solver, lp, rp) && brand_matches(solver, li, ri),
        (
            Brand::Function {
                params: lp,
                ret: lr,
                this: lt,
                props: lo,
            },
            Brand::Function {
                params: rp,
                ret: rr,
                this: rt,
                props: ro,
            },
        ) => {
            brand_matches(solver, lp, rp)
                && brand_matches(solver, lr, rr)
                && brand_matches(solver, lt, rt)
                && brand_matches(solver, lo, ro)
        }
        // A function with own properties against an object of those properties.
        (Brand::Function { props, .. }, Brand::Object(_)) => brand_matches(solver, props, right),
        (Brand::Overloads { overloads: l }, Brand::Overloads { overloads: r }) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| brand_matches(solver, a, b))
        }
        (Brand::Tuple { items: l, .. }, Brand::Tuple { items: r, .. }) => {
            l.len() == r.len()
                && l.iter().zip(r).all(|(a, b)| {
                    a.optional == b.optional
                        && a.rest == b.rest
                        && brand_matches(solver, &a.brand, &b.brand)
                })
        }
        (Brand::Tuple { items, .. }, Brand::Array { items: r, .. }) => items
            .iter()
            .all(|item| brand_matches(solver, &item.brand, r)),
        (Brand::Array { items: l, .. }, Brand::Array { items: r, .. }) => {
            brand_matches(solver, l, r)
        }
        (Brand::Object(l), Brand::Object(r)) => object_matches(solver, l, r),
        _ => false,
    }
}

/// Only the keys of `right` are compared.
fn object_matches(solver: &Solver, left: &ObjectBrand, right: &ObjectBrand) -> bool {
    let properties_fit = right.properties.iter().all(|(name, r_brand)| {
        left.property(*name)
            .is_some_and(|l_brand| brand_matches(solver, l_brand, r_brand))
    });
    let index_fits = |l: &Option<Arc<Brand>>, r: &Option<Arc<Brand>>| match (l, r) {
        (Some(l), Some(r)) => brand_matches(solver, l, r),
        _ => true,
    };
    properties_fit
        && right.required.is_subset(&left.required)
        && index_fits(&left.string_index, &right.string_index)
        && index_fits(&left.number_index, &right.number_index)
        && brand_matches(solver, &left.constructor_params, &right.constructor_params)
}

#[cfg(test)]
#[path = "../tests/brand_tests.rs"]
mod tests;
