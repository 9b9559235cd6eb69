//! The fixed class-index-to-species table the model artifact was trained against.

/// Returned for any class index the table doesn't cover.
pub const UNKNOWN_SPECIES: &str = "Unknown Species";

/// Species names in model output order. The ordering is a compatibility
/// contract with the trained artifact and must not be rearranged.
pub const LABELS: [&str; 75] = [
	"Achalarus lyciades",
	"Anartia jatrophae",
	"Ancyloxypha numitor",
	"Aphrissa statira",
	"Atlides halesus",
	"Battus philenor",
	"Calycopis cecrops",
	"Celastrina ladon",
	"Chlosyne lacinia",
	"Chlosyne nycteis",
	"Colias eurytheme",
	"Danaus gilippus",
	"Danaus plexippus",
	"Dryas iulia",
	"Epargyreus clarus",
	"Euptoieta claudia",
	"Eurema lisa",
	"Eurema nicippe",
	"Eurytides marcellus",
	"Hemiargus ceraunus",
	"Junonia coenia",
	"Limenitis arthemis",
	"Lycaena phlaeas",
	"Megisto cymela",
	"Papilio cresphontes",
	"Papilio glaucus",
	"Papilio polyxenes",
	"Pheos altatus",
	"Phoebis philea",
	"Phyciodes tharos",
	"Pieris rapae",
	"Pyrgus communis",
	"Satyrium calanus",
	"Strymon melinus",
	"Vanessa atalanta",
	"Vanessa cardui",
	"Vanessa virginiensis",
	"Zerene cesonia",
	"Morpho peleides",
	"Catopsilia pomona",
	"Kallima inachus",
	"Idea leuconoe",
	"Troides aeacus",
	"Graphium agamemnon",
	"Papilio machaon",
	"Delias eucharis",
	"Appias albina",
	"Pontia daplidice",
	"Eurema hecabe",
	"Colotis etrida",
	"Pareronia valeria",
	"Cepora nerissa",
	"Spindasis vulcanus",
	"Curetis thetis",
	"Jamides celeno",
	"Anthene emolus",
	"Lethe europa",
	"Ypthima baldus",
	"Mycalesis mineus",
	"Junonia almana",
	"Hypolimnas bolina",
	"Ariadne merione",
	"Acraea violae",
	"Danaus chrysippus",
	"Tirumala limniace",
	"Euploea core",
	"Papilio demoleus",
	"Graphium doson",
	"Papilio memnon",
	"Papilio polymnestor",
	"Pachliopta aristolochiae",
	"Troides helena",
	"Cethosia cyane",
	"Vindula erota",
	"Parthenos sylvia",
];

/// Look up the species name for a class index. Out-of-range indices degrade
/// to [`UNKNOWN_SPECIES`] rather than failing; a mismatched model artifact
/// must never crash the pipeline.
#[must_use]
pub fn label_for(index: usize) -> &'static str {
	LABELS.get(index).copied().unwrap_or(UNKNOWN_SPECIES)
}
