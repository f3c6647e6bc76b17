//! Type interning for structural deduplication.
//!
//! The interner converts `TypeKey` structures into lightweight `TypeId`
//! handles:
//! - O(1) type equality (compare `TypeId` values)
//! - each unique structure stored once
//! - union and intersection normalization happens at construction time, so
//!   `A | B` and `B | A` are the same id

use crate::types::*;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use typebrand_common::limits::{PROPERTY_MAP_THRESHOLD, TYPE_LIST_INLINE};
use typebrand_common::{Atom, ShardedInterner};

const SHARD_BITS: u32 = 6;
const SHARD_COUNT: usize = 1 << SHARD_BITS; // 64 shards
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

#[inline]
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

#[inline]
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PrimitiveClass {
    String,
    Number,
    Boolean,
    Bigint,
    Symbol,
    Null,
    Undefined,
}

struct TypeShard {
    key_to_index: RwLock<FxHashMap<TypeKey, u32>>,
    index_to_key: RwLock<Vec<TypeKey>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: Vec<T>) -> u32 {
        if items.is_empty() {
            return 0;
        }
        if let Some(&id) = self.map.get(items.as_slice()) {
            return id;
        }
        let arc: Arc<[T]> = items.into();
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Arc<[T]> {
        self.items
            .get(id as usize)
            .unwrap_or(&self.items[0])
            .clone()
    }
}

struct ValueInterner<T> {
    items: Vec<Arc<T>>,
    map: FxHashMap<Arc<T>, u32>,
}

impl<T> ValueInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        ValueInterner {
            items: Vec::new(),
            map: FxHashMap::default(),
        }
    }

    fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }
        let arc = Arc::new(value);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<T>> {
        self.items.get(id as usize).cloned()
    }
}

/// Type interning table.
/// Thread-safe via sharded `RwLock` storage.
pub struct TypeInterner {
    shards: [TypeShard; SHARD_COUNT],
    /// String interner for property names, literal values and type names.
    pub string_interner: ShardedInterner,
    type_lists: RwLock<SliceInterner<TypeId>>,
    tuple_lists: RwLock<SliceInterner<TupleElement>>,
    object_shapes: RwLock<ValueInterner<ObjectShape>>,
    object_property_maps: RwLock<Vec<Option<Arc<FxHashMap<Atom, usize>>>>>,
    function_shapes: RwLock<ValueInterner<FunctionShape>>,
    callable_shapes: RwLock<ValueInterner<CallableShape>>,
    named_types: RwLock<ValueInterner<NamedType>>,
    next_unique_symbol: AtomicU32,
}

impl TypeInterner {
    pub fn new() -> Self {
        TypeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            string_interner: {
                let interner = ShardedInterner::new();
                interner.intern_common();
                interner
            },
            type_lists: RwLock::new(SliceInterner::new()),
            tuple_lists: RwLock::new(SliceInterner::new()),
            object_shapes: RwLock::new(ValueInterner::new()),
            object_property_maps: RwLock::new(Vec::new()),
            function_shapes: RwLock::new(ValueInterner::new()),
            callable_shapes: RwLock::new(ValueInterner::new()),
            named_types: RwLock::new(ValueInterner::new()),
            next_unique_symbol: AtomicU32::new(1),
        }
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.string_interner.resolve(atom).to_string()
    }

    /// Resolve an Atom without allocating a new String.
    pub fn resolve_atom_ref(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        read(&self.type_lists).get(id.0)
    }

    pub fn tuple_list(&self, id: TupleListId) -> Arc<[TupleElement]> {
        read(&self.tuple_lists).get(id.0)
    }

    pub fn object_shape(&self, id: ObjectShapeId) -> Arc<ObjectShape> {
        read(&self.object_shapes)
            .get(id.0)
            .unwrap_or_else(|| Arc::new(ObjectShape::default()))
    }

    pub fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape> {
        read(&self.function_shapes).get(id.0).unwrap_or_else(|| {
            Arc::new(FunctionShape {
                signature: Signature::new(Vec::new(), TypeId::ERROR),
                is_constructor: false,
            })
        })
    }

    pub fn callable_shape(&self, id: CallableShapeId) -> Arc<CallableShape> {
        read(&self.callable_shapes)
            .get(id.0)
            .unwrap_or_else(|| Arc::new(CallableShape::default()))
    }

    pub fn named_type(&self, id: NamedTypeId) -> Arc<NamedType> {
        read(&self.named_types).get(id.0).unwrap_or_else(|| {
            Arc::new(NamedType {
                name: Atom::NONE,
                args: TypeListId(0),
                body: TypeId::ERROR,
                builtin: false,
            })
        })
    }

    pub fn object_property_index(&self, shape_id: ObjectShapeId, name: Atom) -> PropertyLookup {
        let shape = self.object_shape(shape_id);
        let Some(map) = self.object_property_map(shape_id, &shape) else {
            return PropertyLookup::Uncached;
        };
        match map.get(&name) {
            Some(&idx) => PropertyLookup::Found(idx),
            None => PropertyLookup::NotFound,
        }
    }

    fn object_property_map(
        &self,
        shape_id: ObjectShapeId,
        shape: &ObjectShape,
    ) -> Option<Arc<FxHashMap<Atom, usize>>> {
        if shape.properties.len() < PROPERTY_MAP_THRESHOLD {
            return None;
        }

        if let Some(Some(map)) = read(&self.object_property_maps).get(shape_id.0 as usize) {
            return Some(map.clone());
        }

        let map: FxHashMap<Atom, usize> = shape
            .properties
            .iter()
            .enumerate()
            .map(|(idx, prop)| (prop.name, idx))
            .collect();
        let map = Arc::new(map);

        let mut maps = write(&self.object_property_maps);
        let slot = shape_id.0 as usize;
        if maps.len() <= slot {
            maps.resize_with(slot + 1, || None);
        }
        if let Some(existing) = &maps[slot] {
            return Some(existing.clone());
        }
        maps[slot] = Some(map.clone());
        Some(map)
    }

    /// Intern a type key and return its TypeId.
    pub fn intern(&self, key: TypeKey) -> TypeId {
        if let Some(id) = Self::reserved_id(&key) {
            return id;
        }

        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        if let Some(&local_index) = read(&shard.key_to_index).get(&key) {
            return Self::make_id(local_index, shard_idx as u32);
        }

        let mut map = write(&shard.key_to_index);
        let mut storage = write(&shard.index_to_key);
        if let Some(&local_index) = map.get(&key) {
            return Self::make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        if local_index > ((u32::MAX - TypeId::FIRST_USER) >> SHARD_BITS) {
            return TypeId::ERROR;
        }
        storage.push(key.clone());
        map.insert(key, local_index);
        Self::make_id(local_index, shard_idx as u32)
    }

    /// Look up the TypeKey for a given TypeId.
    pub fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        if id.is_reserved() {
            return Self::reserved_key(id);
        }
        let raw = id.0.checked_sub(TypeId::FIRST_USER)?;
        let shard_idx = (raw & SHARD_MASK) as usize;
        let local_index = raw >> SHARD_BITS;
        let shard = self.shards.get(shard_idx)?;
        read(&shard.index_to_key).get(local_index as usize).cloned()
    }

    /// Number of interned types, reserved ids included.
    pub fn len(&self) -> usize {
        let mut total = TypeId::FIRST_USER as usize;
        for shard in &self.shards {
            total += read(&shard.index_to_key).len();
        }
        total
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= TypeId::FIRST_USER as usize
    }

    #[inline]
    fn make_id(local_index: u32, shard_idx: u32) -> TypeId {
        let raw = (local_index << SHARD_BITS) | (shard_idx & SHARD_MASK);
        TypeId(TypeId::FIRST_USER + raw)
    }

    fn reserved_id(key: &TypeKey) -> Option<TypeId> {
        match key {
            TypeKey::Intrinsic(kind) => Some(kind.to_type_id()),
            TypeKey::Literal(LiteralValue::Boolean(true)) => Some(TypeId::TRUE),
            TypeKey::Literal(LiteralValue::Boolean(false)) => Some(TypeId::FALSE),
            _ => None,
        }
    }

    fn reserved_key(id: TypeId) -> Option<TypeKey> {
        match id {
            TypeId::TRUE => Some(TypeKey::Literal(LiteralValue::Boolean(true))),
            TypeId::FALSE => Some(TypeKey::Literal(LiteralValue::Boolean(false))),
            _ => IntrinsicKind::from_type_id(id).map(TypeKey::Intrinsic),
        }
    }

    fn intern_type_list(&self, members: Vec<TypeId>) -> TypeListId {
        TypeListId(write(&self.type_lists).intern(members))
    }

    fn intern_tuple_list(&self, elements: Vec<TupleElement>) -> TupleListId {
        TupleListId(write(&self.tuple_lists).intern(elements))
    }

    fn intern_object_shape(&self, shape: ObjectShape) -> ObjectShapeId {
        ObjectShapeId(write(&self.object_shapes).intern(shape))
    }

    fn intern_function_shape(&self, shape: FunctionShape) -> FunctionShapeId {
        FunctionShapeId(write(&self.function_shapes).intern(shape))
    }

    fn intern_callable_shape(&self, shape: CallableShape) -> CallableShapeId {
        CallableShapeId(write(&self.callable_shapes).intern(shape))
    }

    fn intern_named_type(&self, named: NamedType) -> NamedTypeId {
        NamedTypeId(write(&self.named_types).intern(named))
    }

    // =========================================================================
    // Convenience constructors
    // =========================================================================

    pub fn literal_string(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeKey::Literal(LiteralValue::String(atom)))
    }

    pub fn literal_number(&self, value: f64) -> TypeId {
        self.intern(TypeKey::Literal(LiteralValue::Number(OrderedFloat(value))))
    }

    pub fn literal_boolean(&self, value: bool) -> TypeId {
        if value { TypeId::TRUE } else { TypeId::FALSE }
    }

    /// Intern a bigint literal from its decimal digits.
    pub fn literal_bigint(&self, negative: bool, digits: &str) -> TypeId {
        let atom = if negative && digits != "0" {
            let mut value = String::with_capacity(digits.len() + 1);
            value.push('-');
            value.push_str(digits);
            self.string_interner.intern_owned(value)
        } else {
            self.intern_string(digits)
        };
        self.intern(TypeKey::Literal(LiteralValue::BigInt(atom)))
    }

    /// A fresh `unique symbol`, distinct from every other one.
    pub fn unique_symbol(&self, name: &str) -> TypeId {
        let id = self.next_unique_symbol.fetch_add(1, Ordering::Relaxed);
        let name = self.intern_string(name);
        self.intern(TypeKey::UniqueSymbol { id, name })
    }

    /// The empty object type `{}`.
    pub fn empty_object(&self) -> TypeId {
        self.object(Vec::new())
    }

    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        self.union_from_iter(members)
    }

    pub fn union2(&self, left: TypeId, right: TypeId) -> TypeId {
        self.union_from_iter([left, right])
    }

    fn union_from_iter<I>(&self, members: I) -> TypeId
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut iter = members.into_iter();
        let Some(first) = iter.next() else {
            return TypeId::NEVER;
        };
        let Some(second) = iter.next() else {
            return first;
        };

        let mut flat: TypeListBuffer = SmallVec::new();
        self.push_union_member(&mut flat, first);
        self.push_union_member(&mut flat, second);
        for member in iter {
            self.push_union_member(&mut flat, member);
        }
        self.normalize_union(flat)
    }

    fn push_union_member(&self, flat: &mut TypeListBuffer, member: TypeId) {
        if let Some(TypeKey::Union(inner)) = self.lookup(member) {
            flat.extend(self.type_list(inner).iter().copied());
        } else {
            flat.push(member);
        }
    }

    fn normalize_union(&self, mut flat: TypeListBuffer) -> TypeId {
        flat.sort_by_key(|id| id.0);
        flat.dedup();

        if flat.contains(&TypeId::ERROR) {
            return TypeId::ERROR;
        }
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }
        flat.retain(|id| *id != TypeId::NEVER);

        // `true | false` is `boolean`.
        if flat.contains(&TypeId::TRUE) && flat.contains(&TypeId::FALSE) {
            flat.retain(|id| *id != TypeId::TRUE && *id != TypeId::FALSE);
            flat.push(TypeId::BOOLEAN);
            flat.sort_by_key(|id| id.0);
            flat.dedup();
        }

        self.absorb_literals_into_primitives(&mut flat);

        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => {
                let list_id = self.intern_type_list(flat.into_vec());
                self.intern(TypeKey::Union(list_id))
            }
        }
    }

    /// `"a" | string` => `string`, `1 | number` => `number`,
    /// `true | boolean` => `boolean`, `unique symbol | symbol` => `symbol`.
    fn absorb_literals_into_primitives(&self, flat: &mut TypeListBuffer) {
        let has_string = flat.contains(&TypeId::STRING);
        let has_number = flat.contains(&TypeId::NUMBER);
        let has_boolean = flat.contains(&TypeId::BOOLEAN);
        let has_bigint = flat.contains(&TypeId::BIGINT);
        let has_symbol = flat.contains(&TypeId::SYMBOL);
        if !(has_string || has_number || has_boolean || has_bigint || has_symbol) {
            return;
        }

        flat.retain(|type_id| match self.lookup(*type_id) {
            Some(TypeKey::Literal(literal)) => match literal {
                LiteralValue::String(_) => !has_string,
                LiteralValue::Number(_) => !has_number,
                LiteralValue::Boolean(_) => !has_boolean,
                LiteralValue::BigInt(_) => !has_bigint,
            },
            Some(TypeKey::UniqueSymbol { .. }) => !has_symbol,
            _ => true,
        });
    }

    pub fn intersection(&self, members: Vec<TypeId>) -> TypeId {
        self.intersection_from_iter(members)
    }

    pub fn intersection2(&self, left: TypeId, right: TypeId) -> TypeId {
        self.intersection_from_iter([left, right])
    }

    fn intersection_from_iter<I>(&self, members: I) -> TypeId
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut iter = members.into_iter();
        let Some(first) = iter.next() else {
            return TypeId::UNKNOWN;
        };
        let Some(second) = iter.next() else {
            return first;
        };

        let mut flat: TypeListBuffer = SmallVec::new();
        self.push_intersection_member(&mut flat, first);
        self.push_intersection_member(&mut flat, second);
        for member in iter {
            self.push_intersection_member(&mut flat, member);
        }
        self.normalize_intersection(flat)
    }

    fn push_intersection_member(&self, flat: &mut TypeListBuffer, member: TypeId) {
        let members: TypeListBuffer = match self.lookup(member) {
            Some(TypeKey::Intersection(inner)) => self.type_list(inner).iter().copied().collect(),
            _ => SmallVec::from_slice(&[member]),
        };
        for member in members {
            // Keep written order; signatures merged from function members
            // become overloads in that order.
            if !flat.contains(&member) {
                flat.push(member);
            }
        }
    }

    fn normalize_intersection(&self, mut flat: TypeListBuffer) -> TypeId {
        if flat.contains(&TypeId::ERROR) {
            return TypeId::ERROR;
        }
        if flat.contains(&TypeId::NEVER) {
            return TypeId::NEVER;
        }
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        flat.retain(|id| *id != TypeId::UNKNOWN);
        if self.intersection_has_disjoint_primitives(&mut flat) {
            return TypeId::NEVER;
        }
        match flat.len() {
            0 => return TypeId::UNKNOWN,
            1 => return flat[0],
            _ => {}
        }

        if let Some(merged) = self.try_merge_object_members(&flat) {
            return merged;
        }

        flat.sort_by_key(|id| id.0);
        let list_id = self.intern_type_list(flat.into_vec());
        self.intern(TypeKey::Intersection(list_id))
    }

    /// Detects `string & number`, `1 & 2` and friends. Collapses
    /// `"a" & string` to `"a"` in place.
    fn intersection_has_disjoint_primitives(&self, flat: &mut TypeListBuffer) -> bool {
        let mut class: Option<PrimitiveClass> = None;
        let mut literal: Option<TypeId> = None;
        for &member in flat.iter() {
            let Some(member_class) = self.primitive_class_for(member) else {
                continue;
            };
            match class {
                Some(existing) if existing != member_class => return true,
                _ => class = Some(member_class),
            }
            if self.is_unit_primitive(member) {
                match literal {
                    Some(existing) if existing != member => return true,
                    _ => literal = Some(member),
                }
            }
        }
        if let Some(literal) = literal {
            // The unit type subsumes its widened primitive.
            flat.retain(|id| {
                *id == literal || self.primitive_class_for(*id).is_none()
            });
        }
        false
    }

    fn is_unit_primitive(&self, type_id: TypeId) -> bool {
        matches!(
            self.lookup(type_id),
            Some(TypeKey::Literal(_)) | Some(TypeKey::UniqueSymbol { .. })
        )
    }

    fn primitive_class_for(&self, type_id: TypeId) -> Option<PrimitiveClass> {
        match type_id {
            TypeId::STRING => Some(PrimitiveClass::String),
            TypeId::NUMBER => Some(PrimitiveClass::Number),
            TypeId::BOOLEAN | TypeId::TRUE | TypeId::FALSE => Some(PrimitiveClass::Boolean),
            TypeId::BIGINT => Some(PrimitiveClass::Bigint),
            TypeId::SYMBOL => Some(PrimitiveClass::Symbol),
            TypeId::NULL => Some(PrimitiveClass::Null),
            TypeId::UNDEFINED | TypeId::VOID => Some(PrimitiveClass::Undefined),
            _ if type_id.is_reserved() => None,
            _ => match self.lookup(type_id)? {
                TypeKey::Literal(LiteralValue::String(_)) => Some(PrimitiveClass::String),
                TypeKey::Literal(LiteralValue::Number(_)) => Some(PrimitiveClass::Number),
                TypeKey::Literal(LiteralValue::Boolean(_)) => Some(PrimitiveClass::Boolean),
                TypeKey::Literal(LiteralValue::BigInt(_)) => Some(PrimitiveClass::Bigint),
                TypeKey::UniqueSymbol { .. } => Some(PrimitiveClass::Symbol),
                _ => None,
            },
        }
    }

    /// Merge an intersection whose members are all objects, functions or
    /// callables into a single structural type.
    fn try_merge_object_members(&self, members: &[TypeId]) -> Option<TypeId> {
        let mut merged = CallableShape::default();
        let mut string_index: Option<IndexSignature> = None;
        let mut number_index: Option<IndexSignature> = None;
        let mut discriminant_clash = false;

        for &member in members {
            let (properties, calls, constructs, sidx, nidx) = match self.lookup(member)? {
                TypeKey::Object(shape_id) => {
                    let shape = self.object_shape(shape_id);
                    (
                        shape.properties.clone(),
                        Vec::new(),
                        Vec::new(),
                        shape.string_index,
                        shape.number_index,
                    )
                }
                TypeKey::Function(shape_id) => {
                    let shape = self.function_shape(shape_id);
                    if shape.is_constructor {
                        (Vec::new(), Vec::new(), vec![shape.signature.clone()], None, None)
                    } else {
                        (Vec::new(), vec![shape.signature.clone()], Vec::new(), None, None)
                    }
                }
                TypeKey::Callable(shape_id) => {
                    let shape = self.callable_shape(shape_id);
                    (
                        shape.properties.clone(),
                        shape.call_signatures.clone(),
                        shape.construct_signatures.clone(),
                        None,
                        None,
                    )
                }
                _ => return None,
            };

            for prop in properties {
                if let Some(existing) = merged.properties.iter_mut().find(|p| p.name == prop.name) {
                    if existing.type_id != prop.type_id {
                        let both_units = self.is_unit_primitive(existing.type_id)
                            && self.is_unit_primitive(prop.type_id);
                        existing.type_id = self.intersection2(existing.type_id, prop.type_id);
                        if both_units && existing.type_id == TypeId::NEVER {
                            discriminant_clash = true;
                        }
                    }
                    existing.optional = existing.optional && prop.optional;
                    existing.readonly = existing.readonly || prop.readonly;
                } else {
                    merged.properties.push(prop);
                }
            }
            merged.call_signatures.extend(calls);
            merged.construct_signatures.extend(constructs);
            string_index = self.merge_index(string_index, sidx);
            number_index = self.merge_index(number_index, nidx);
        }

        if discriminant_clash {
            return Some(TypeId::NEVER);
        }

        let has_signatures =
            !merged.call_signatures.is_empty() || !merged.construct_signatures.is_empty();
        if has_signatures && (string_index.is_some() || number_index.is_some()) {
            return None;
        }
        if has_signatures {
            return Some(self.callable(merged));
        }
        Some(self.object_with_index(ObjectShape {
            properties: merged.properties,
            string_index,
            number_index,
        }))
    }

    fn merge_index(
        &self,
        existing: Option<IndexSignature>,
        incoming: Option<IndexSignature>,
    ) -> Option<IndexSignature> {
        match (existing, incoming) {
            (Some(a), Some(b)) => Some(IndexSignature {
                value_type: self.intersection2(a.value_type, b.value_type),
                readonly: a.readonly || b.readonly,
            }),
            (a, b) => a.or(b),
        }
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeKey::Array(element))
    }

    pub fn readonly_array(&self, element: TypeId) -> TypeId {
        let array_type = self.array(element);
        self.intern(TypeKey::ReadonlyType(array_type))
    }

    /// Intern a tuple type. Rest elements spreading a tuple are inlined and
    /// `[...T[]]` is the array `T[]`.
    pub fn tuple(&self, elements: Vec<TupleElement>) -> TypeId {
        let elements = if elements.iter().any(|e| e.rest) {
            self.spread_rest_tuples(elements)
        } else {
            elements
        };
        if let [only] = elements.as_slice() {
            if only.rest {
                if let Some(TypeKey::Array(_)) = self.lookup(only.type_id) {
                    return only.type_id;
                }
            }
        }
        let list_id = self.intern_tuple_list(elements);
        self.intern(TypeKey::Tuple(list_id))
    }

    fn spread_rest_tuples(&self, elements: Vec<TupleElement>) -> Vec<TupleElement> {
        let mut spread = Vec::with_capacity(elements.len());
        for element in elements {
            match self.lookup(element.type_id) {
                Some(TypeKey::Tuple(list_id)) if element.rest => {
                    spread.extend(self.tuple_list(list_id).iter().copied());
                }
                _ => spread.push(element),
            }
        }
        spread
    }

    pub fn readonly_tuple(&self, elements: Vec<TupleElement>) -> TypeId {
        let tuple_type = self.tuple(elements);
        self.readonly(tuple_type)
    }

    /// Wrap an array or tuple in `readonly`. Other types are returned as-is.
    pub fn readonly(&self, type_id: TypeId) -> TypeId {
        match self.lookup(type_id) {
            Some(TypeKey::Array(_)) | Some(TypeKey::Tuple(_)) => {
                self.intern(TypeKey::ReadonlyType(type_id))
            }
            _ => type_id,
        }
    }

    pub fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        self.object_with_index(ObjectShape {
            properties,
            string_index: None,
            number_index: None,
        })
    }

    pub fn object_with_index(&self, mut shape: ObjectShape) -> TypeId {
        self.canonicalize_properties(&mut shape.properties);
        let shape_id = self.intern_object_shape(shape);
        self.intern(TypeKey::Object(shape_id))
    }

    /// Sort by name and drop duplicate names (first declaration wins).
    fn canonicalize_properties(&self, properties: &mut Vec<PropertyInfo>) {
        properties.sort_by_cached_key(|p| self.resolve_atom_ref(p.name));
        properties.dedup_by_key(|p| p.name);
    }

    pub fn function(&self, signature: Signature) -> TypeId {
        self.function_shape_type(FunctionShape {
            signature,
            is_constructor: false,
        })
    }

    pub fn constructor(&self, signature: Signature) -> TypeId {
        self.function_shape_type(FunctionShape {
            signature,
            is_constructor: true,
        })
    }

    fn function_shape_type(&self, shape: FunctionShape) -> TypeId {
        let shape_id = self.intern_function_shape(shape);
        self.intern(TypeKey::Function(shape_id))
    }

    /// Intern a callable. Shapes without signatures become objects and a
    /// lone signature without properties becomes a plain function type.
    pub fn callable(&self, mut shape: CallableShape) -> TypeId {
        let calls = shape.call_signatures.len();
        let constructs = shape.construct_signatures.len();
        if calls == 0 && constructs == 0 {
            return self.object(shape.properties);
        }
        if shape.properties.is_empty() {
            if calls == 1 && constructs == 0 {
                if let Some(signature) = shape.call_signatures.pop() {
                    return self.function(signature);
                }
            }
            if calls == 0 && constructs == 1 {
                if let Some(signature) = shape.construct_signatures.pop() {
                    return self.constructor(signature);
                }
            }
        }
        self.canonicalize_properties(&mut shape.properties);
        let shape_id = self.intern_callable_shape(shape);
        self.intern(TypeKey::Callable(shape_id))
    }

    pub fn named(&self, name: &str, args: Vec<TypeId>, body: TypeId, builtin: bool) -> TypeId {
        let name = self.intern_string(name);
        let args = self.intern_type_list(args);
        let named_id = self.intern_named_type(NamedType {
            name,
            args,
            body,
            builtin,
        });
        self.intern(TypeKey::Named(named_id))
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
