//! Canonical Irish location reference data.
//!
//! Ground truth for location matching: all 32 counties (Republic plus
//! Northern Ireland) and the major cities and towns the scrapers cover.
//! Never mutated at runtime.

/// All 32 counties in Ireland.
pub const COUNTIES: [&str; 32] = [
    "Antrim", "Armagh", "Carlow", "Cavan", "Clare", "Cork",
    "Derry", "Donegal", "Down", "Dublin", "Fermanagh", "Galway",
    "Kerry", "Kildare", "Kilkenny", "Laois", "Leitrim", "Limerick",
    "Longford", "Louth", "Mayo", "Meath", "Monaghan", "Offaly",
    "Roscommon", "Sligo", "Tipperary", "Tyrone", "Waterford",
    "Westmeath", "Wexford", "Wicklow",
];

/// Major cities and towns across Ireland, largest centres first.
pub const CITIES_AND_TOWNS: &[&str] = &[
    // Major cities
    "Dublin", "Cork", "Belfast", "Galway", "Limerick", "Waterford",
    // Large towns (county towns and major centres)
    "Drogheda", "Kilkenny", "Wexford", "Sligo", "Dundalk", "Bray",
    "Navan", "Ennis", "Tralee", "Carlow", "Naas", "Athlone",
    "Portlaoise", "Mullingar", "Clonakilty", "Moate", "Derry",
    "Newry", "Armagh", "Omagh", "Enniskillen", "Ballymena",
    "Coleraine", "Lisburn", "Bangor", "Newtownabbey",
    // Additional major towns
    "Letterkenny", "Monaghan", "Cavan", "Roscommon", "Longford",
    "Tullamore", "Birr", "Nenagh", "Thurles", "Clonmel", "Dungarvan",
    "New Ross", "Gorey", "Arklow", "Wicklow", "Greystones", "Leixlip",
    "Celbridge", "Maynooth", "Athy", "Newbridge", "Kildare", "Trim",
    "Kells", "Ashbourne", "Laytown", "Bettystown", "Ardee", "Carrickmacross",
    "Castleblayney", "Ballybay", "Clones", "Granard", "Edgeworthstown",
    "Ballymahon", "Lanesborough", "Strokestown", "Boyle", "Tubbercurry",
    "Enniscrone", "Ballina", "Westport", "Castlebar", "Claremorris",
    "Ballinrobe", "Swinford", "Charlestown", "Kiltimagh", "Ballyhaunis",
    "Foxford", "Crossmolina", "Belmullet", "Achill", "Newport",
    "Louisburgh", "Leenane", "Clifden", "Ballinasloe", "Tuam",
    "Gort", "Loughrea", "Portumna", "Mountbellew", "Headford",
    "Oughterard", "Spiddal", "Kinvara", "Clarinbridge", "Oranmore",
    "Salthill", "Moycullen", "Kilronan", "Milltown Malbay", "Lahinch",
    "Ennistymon", "Lisdoonvarna", "Ballyvaughan", "Corofin", "Tulla",
    "Sixmilebridge", "Shannon", "Newmarket-on-Fergus", "Quin", "Kilrush",
    "Kilkee", "Listowel", "Ballybunion", "Tarbert", "Abbeyfeale",
    "Newcastle West", "Rathkeale", "Askeaton", "Adare", "Kilmallock",
    "Charleville", "Bruff", "Croom", "Pallasgreen", "Murroe", "Cappamore",
    "Doon", "Oola", "Hospital", "Knocklong", "Galbally", "Emly",
    "Tipperary", "Cashel", "Fethard", "Mullinahone", "Callan", "Thomastown",
    "Graiguenamanagh", "Inistioge", "Bennettsbridge", "Freshford", "Urlingford",
    "Johnstown", "Windgap", "Mooncoin", "Piltown", "Fiddown", "Ballyhale",
    "Knocktopher", "Stoneyford", "Gowran", "Paulstown", "Bagenalstown",
    "Muine Bheag", "Borris", "Myshall", "Rathvilly", "Tullow", "Hacketstown",
    "Tinahely", "Shillelagh", "Carnew", "Avoca", "Rathdrum", "Laragh",
    "Glendalough", "Roundwood", "Ashford", "Kilcoole", "Newcastle",
    "Delgany", "Kilpedder", "Newtownmountkennedy", "Rathnew", "Avondale",
    "Dunlavin", "Baltinglass", "Blessington", "Saggart", "Rathcoole",
    "Clondalkin", "Lucan", "Palmerstown", "Chapelizod", "Blanchardstown",
    "Castleknock", "Mulhuddart", "Swords", "Malahide", "Portmarnock",
    "Howth", "Sutton", "Baldoyle", "Clontarf", "Raheny", "Kilbarrack",
    "Coolock", "Artane", "Beaumont", "Drumcondra", "Glasnevin", "Finglas",
    "Ballymun", "Santry", "Whitehall", "Phibsborough", "Cabra", "Stoneybatter",
    "Smithfield", "Oxmantown", "Grangegorman", "Broadstone", "Parnell",
    "Summerhill", "Mountjoy", "Dorset", "Gardiner", "Buckingham", "Fitzwilliam",
    "Merrion", "Ballsbridge", "Donnybrook", "Ranelagh", "Rathmines", "Rathgar",
    "Terenure", "Rathfarnham", "Templeogue", "Knocklyon", "Firhouse", "Tallaght",
    "Jobstown", "Ronanstown", "Adamstown",
    "Straffan", "Kilcock", "Prosperous", "Allenwood", "Derrinturn", "Carbury",
    "Edenderry", "Daingean", "Walsh Island", "Ferbane", "Banagher", "Cloghan",
    "Shannonbridge", "Clonmacnoise", "Leabeg", "Ballycumber", "Mucklagh",
    "Clara", "Horseleap", "Streamstown", "Fardrum", "Glasson",
    "Tang", "Ballymore", "Rochfortbridge", "Tyrellspass", "Kilbeggan",
    "Milltownpass", "Delvin", "Castletown-Geoghegan", "Crookedwood", "Collinstown",
    "Fore", "Castlepollard", "Oldcastle", "Ballinagh", "Killeshandra",
    "Belturbet", "Ballyconnell", "Blacklion", "Dowra", "Glangevlin",
    "Swanlinbar", "Bawnboy", "Butlersbridge", "Ballyjamesduff", "Virginia",
    "Cootehill", "Shercock", "Kingscourt", "Inniskeen",
    "Oram", "Emyvale", "Glaslough", "Scotshouse", "Newbliss", "Smithborough",
    "Threemilehouse", "Tyholland", "Tydavnet", "Rockcorry",
    "Aughnacloy", "Ballygawley", "Clogher", "Fivemiletown", "Lisnaskea",
    "Brookeborough", "Maguiresbridge", "Derrygonnelly", "Kesh", "Belleek",
    "Garrison", "Belcoo", "Ballyshannon",
    "Bundoran", "Kinlough", "Tullaghan", "Cliffony", "Grange", "Drumcliff",
    "Rathcormack", "Ballysadare", "Collooney", "Ballymote", "Gurteen",
    "Knock", "Ballindine",
    "Milltown", "Kilmaine", "Partry", "Tourmakeady",
    "Murrisk", "Mulranny",
    "Achill Sound", "Keel", "Dugort", "Pollagh", "Blacksod",
    "Killala", "Ballycastle", "Belderrig", "Porturlin", "Carrowteige",
    "Lahardane", "Pontoon", "Bekan", "Ballaghaderreen",
    "Frenchpark", "Tulsk", "Elphin", "Carrick-on-Shannon",
    "Drumshanbo", "Leitrim", "Manorhamilton", "Dromahair",
    "Drumkeerin", "Glencar", "Glenade", "Rossinver",
];

/// The seven cities checked against band names when no structured
/// location is available.
pub const MAJOR_CITIES: [&str; 7] = [
    "Dublin", "Cork", "Belfast", "Galway", "Limerick", "Waterford", "Derry",
];

/// Keyword hints used for best-effort city guesses from entity names.
/// These are guesses, not detections; callers must surface them as such.
pub const CITY_KEYWORDS: &[(&str, &str)] = &[
    ("dublin", "Dublin"),
    ("dub", "Dublin"),
    ("temple bar", "Dublin"),
    ("grafton", "Dublin"),
    ("o'connell", "Dublin"),
    ("cork", "Cork"),
    ("rebel", "Cork"),
    ("belfast", "Belfast"),
    ("ulster", "Belfast"),
    ("galway", "Galway"),
];

/// Venue counts per city from the imported venue dataset, used as the
/// reference distribution for proportional location backfill.
pub const VENUE_CITY_WEIGHTS: &[(&str, u32)] = &[
    ("Dublin", 143),
    ("Cork", 119),
    ("Belfast", 95),
    ("Galway", 76),
    ("Limerick", 58),
    ("Waterford", 48),
    ("Kilkenny", 46),
    ("Sligo", 41),
    ("Wexford", 32),
    ("Tralee", 29),
];
