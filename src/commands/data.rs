//! Fixed inputs of the example commands.

pub const PLAY_DOCS: [&str; 3] = [
    "Pass the ball to someone else.",
    "Take a 2 point shot",
    "Take a 3 point shot",
];

pub const TRAVEL_PHRASES: [&str; 1] = ["Dribble the ball to the other side of the court."];

pub const PASS_PHRASES: [&str; 3] = [
    "Pass the ball to your teammate.",
    "Pass the ball to the player on your left.",
    "Pass the ball to the player on your right.",
];

pub const SHOOT_PHRASES: [&str; 6] = [
    "Shoot the ball into the hoop.",
    "Shoot the ball into the basket.",
    "Atempt a 3 point shot.",
    "Attempt a 2 point shot.",
    "Attempt a free throw.",
    "Attempt to dunk the ball into the hoop.",
];

/// Short encyclopedia passages indexed by `index-docs`.
pub const TEAM_MESSAGES: [&str; 12] = [
    "An adventure is an exciting experience or undertaking that is typically bold, sometimes risky. Adventures may be activities with danger such as traveling, exploring, skydiving, mountain climbing, scuba diving, river rafting, or other extreme sports. Adventures are often undertaken to create psychological arousal or in order to achieve a greater goal, such as the pursuit of knowledge that can only be obtained by such activities.",
    "Basketball is a team sport in which two teams, most commonly of five players each, opposing one another on a rectangular court, compete with the primary objective of shooting a basketball through the defender's hoop, while preventing the opposing team from shooting through their own hoop. A field goal is worth two points, unless made from behind the three-point line, when it is worth three. After a foul, timed play stops and the player fouled or designated to shoot a technical foul is given one, two or three one-point free throws. The team with the most points at the end of the game wins, but if regulation play expires with the score tied, an additional period of play is mandated.",
    "Michael Jeffrey Jordan, also known by his initials MJ, is an American businessman and former professional basketball player. He played fifteen seasons in the National Basketball Association between 1984 and 2003, winning six NBA championships with the Chicago Bulls. He was integral in popularizing basketball and the NBA around the world in the 1980s and 1990s, becoming a global cultural icon. His profile on the NBA website states, \"By acclamation, Michael Jordan is the greatest basketball player of all time.\"",
    "The National Basketball Association is a professional basketball league in North America composed of 30 teams. It is one of the major professional sports leagues in the United States and Canada and is considered the premier professional basketball league in the world.",
    "The Chicago Bulls are an American professional basketball team based in Chicago. The Bulls compete in the National Basketball Association as a member of the Central Division of the Eastern Conference. The team was founded on January 16, 1966, and played its first game during the 1966-67 NBA season. The Bulls play their home games at the United Center, an arena on Chicago's West Side.",
    "In basketball, the basketball court is the playing surface, consisting of a rectangular floor, with baskets at each end. Indoor basketball courts are almost always made of polished wood, usually maple, with 10 foot high rims on each basket. Outdoor surfaces are generally made from standard paving materials such as concrete or asphalt. International competitions may use glass basketball courts.",
    "A backboard is a piece of basketball equipment. It is a raised vertical board with an attached basket consisting of a net suspended from a hoop. It is made of a flat, rigid piece of, often Plexiglas or tempered glass which also has the properties of safety glass when accidentally shattered. It is usually rectangular as used in NBA, NCAA and international basketball. In recreational environments, a backboard may be oval or a fan-shape, particularly in non-professional games.",
    "A layup in basketball is a two-point shot attempt made by leaping from below, laying the ball up near the basket, and using one hand to bounce it off the backboard and into the basket. The motion and one-handed reach distinguish it from a jump shot. The layup is considered the most basic shot in basketball. When doing a layup, the player lifts the outside foot, or the foot away from the basket.",
    "A slam dunk, also simply known as dunk, is a type of basketball shot that is performed when a player jumps in the air, controls the ball above the horizontal plane of the rim, and scores by shoving the ball directly through the basket with one or both hands. It is a type of field goal that is worth two points. Such a shot was known as a \"dunk shot\" until the term \"slam dunk\" was coined by former Los Angeles Lakers announcer Chick Hearn.",
    "In basketball, a field goal is a basket scored on any shot or tap other than a free throw, worth two or three points depending on the location of the attempt on the basket. Uncommonly, a field goal can be worth other values such as one point in FIBA 3x3 basketball competitions or four points in the BIG3 basketball league. \"Field goal\" is the official terminology used by the National Basketball Association in their rule book, in their box scores and statistics, and in referees' rulings. The same term is also the official wording used by the National Collegiate Athletic Association and high school basketball.",
    "The finger roll is a specialized type of basketball layup shot where the ball is rolled off the tips of the player's fingers. The advantage of the finger roll is that the ball can travel high in the air over a defender that might otherwise block a regular jump shot or dunk, while the spin applied by the rolling over the fingers will carry the ball to the basket off the backboard. The shot was pioneered by center Wilt Chamberlain in the 1960s.",
    "A shot clock is a countdown timer used in a variety of games and sports, indicating a set amount of time that a team may possess the object of play before attempting to score a goal. Shot clocks are used in several sports including basketball, water polo, canoe polo, lacrosse, poker, ringette, korfball, tennis, ten-pin bowling, and various cue sports. It is analogous with the play clock used in American and Canadian football, and the pitch clock used in baseball. This article deals chiefly with the shot clock used in basketball.",
];

pub const MICHAEL_JORDAN_FACTS: [(&str, &str); 8] = [
    (
        "mj1",
        "Michael Jordan is a retired professional basketball player.",
    ),
    (
        "mj2",
        "In 1984 Jordan, a guard standing 6 feet 6 inches (1.98 meters), was drafted by the Chicago Bulls. He quickly became known as an exceptionally talented shooter and passer and a tenacious defender. In his first season (1984-85), he led the league in scoring and was named Rookie of the Year; after missing most of the following season with a broken foot, he returned to lead the NBA in scoring for seven consecutive seasons, averaging about 33 points per game. He was only the second player (after Wilt Chamberlain) to score 3,000 points in a single season (1986-87). Jordan was named the NBA's Most Valuable Player (MVP) five times (1988, 1991, 1992, 1996, 1998) and was also named Defensive Player of the Year in 1988.",
    ),
    (
        "mj3",
        "Jordan grew up in Wilmington, North Carolina, and entered the University of North Carolina at Chapel Hill in 1981. As a freshman, he made the winning basket against Georgetown in the 1982 national championship game. Jordan was named College Player of the Year in both his sophomore and junior years, leaving North Carolina after his junior year. He led the U.S. basketball team to Olympic gold medals in 1984 in Los Angeles and in 1992 in Barcelona, Spain. The players who competed in the latter Games became known as the Dream Team.",
    ),
    (
        "mj4",
        "In October 1993, after leading the Bulls to their third consecutive championship, Jordan retired briefly and pursued a career in professional baseball. He returned to basketball in March 1995. In the 1995-96 season Jordan led the Bulls to a 72-10 regular season record, the best in the history of the NBA (broken in 2015-16 by the Golden State Warriors). From 1996 to 1998 the Jordan-led Bulls again won three championships in a row, and each time Jordan was named MVP of the NBA finals. After the 1997-98 season Jordan retired again.",
    ),
    (
        "mj5",
        "During this time Jordan earned the nickname \"Air Jordan\" because of his extraordinary leaping ability and acrobatic maneuvers, and his popularity reached heights few athletes (or celebrities of any sort) have known. He accumulated millions of dollars from endorsements, most notably for his Nike Air Jordan basketball shoes.",
    ),
    (
        "mj6",
        "Jordan remained close to the sport, buying a share of the Washington Wizards in January 2000. He was also appointed president of basketball operations for the club. However, managing rosters and salary caps was not enough for Jordan, and in September 2001 he renounced his ownership and management positions with the Wizards in order to be a player on the team. His second return to the NBA was greeted with enthusiasm by the league, which had suffered declining attendance and television ratings since his 1998 retirement. After the 2002-03 season, Jordan announced his final retirement. He ended his career with 32,292 total points and a 30.1-points-per-game average, which was the best in league history at that time, as well as 2,514 steals, then the second most ever.",
    ),
    (
        "mj7",
        "In 2006 Jordan became minority owner and general manager of the NBA's Charlotte Bobcats (now known as the Charlotte Hornets). He bought a controlling interest in the team in 2010 and became the first former NBA player to become a majority owner of one of the league's franchises. Jordan sold his share in 2023.",
    ),
    (
        "mj8",
        "Jordan made a successful film, Space Jam (1996), in which he starred with animated characters Bugs Bunny and Daffy Duck. In 1996 the NBA named him one of the 50 greatest players of all time, and in 2009 he was elected to the Naismith Memorial Basketball Hall of Fame. He was awarded the Presidential Medal of Freedom in 2016.",
    ),
];

pub const DEFAULT_QUESTION: &str = "What was the name of the astrologer that visited Gautama's father?";

pub const DEFAULT_CONTEXT: &str = "According to this narrative, shortly after the birth of young prince Gautama, an astrologer named Asita visited the young prince's father, Suddhodana, and prophesied that Siddhartha would either become a great king or renounce the material world to become a holy man, depending on whether he saw what life was like outside the palace walls.";

pub const DEFAULT_BILL: &str = "Marine and Hydrokinetic Renewable Energy Promotion Act of 2011 - Amends the Energy Independence and Security Act of 2007 to require the program of marine and hydrokinetic renewable energy technology research, development, demonstration, and commercial application to: (1) apply advanced systems engineering and system integration methods to identify critical interfaces and develop open standards for marine and hydrokinetic renewable energy; (2) transfer the resulting environmental data to industry stakeholders as public information through published interface definitions, standards, and demonstration projects; and (3) develop incentives for industry to comply with such standards.\n\nRequires the Secretary of Energy (DOE) to award competitive grants to support modifying or constructing four or more geographically dispersed marine and hydrokinetic renewable energy technology research, development, and demonstration test facilities for the demonstration of multiple technologies in actual operating environments. Requires the Secretary to give preference to existing facilities and National Marine Renewable Energy Research, Development, and Demonstration Centers. Renames such Centers as the \"National Marine and Hydrokinetic Renewable Energy Research, Development, and Demonstration Centers\" and expands their research and clearinghouse duties to include hydrokinetic as well as marine renewable energy research. Authorizes such Centers to serve as technology test facilities. Requires the Secretary to establish a marine-based energy device verification program to provide a bridge from the marine and hydrokinetic renewable energy capture device design and development efforts underway across the industry to commercial deployment of such devices. Requires the Secretary to establish a grant program to: (1) advance the development of marine and hydrokinetic renewable energy; (2) help fund the costs of environmental analysis affecting the deployment of marine hydrokinetic devices; (3) help eligible entities to collect the types of environmental data that are required when working in a public resource, monitor the impacts of demonstration projects, and make the resulting information available for dissemination to aid future projects; and (4) help fund the cost of advancing renewable marine and hydrokinetic technologies in ocean and riverine environments from demonstration projects to development and deployment. Authorizes appropriations for marine and hydrokinetic renewable energy technologies through FY2013.";
